//! GetUsageGuideHandler - Query handler describing the invitation API.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::directory::DirectoryEntry;
use crate::ports::{DirectoryError, DirectoryProvider};

/// One documented endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
}

/// Addressable user listed in the guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub real_name: String,
}

impl From<DirectoryEntry> for UserInfo {
    fn from(entry: DirectoryEntry) -> Self {
        Self {
            id: entry.identifier,
            name: entry.handle,
            real_name: entry.display_name,
        }
    }
}

/// Usage guide plus the live roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageGuide {
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
    pub users: Vec<UserInfo>,
}

pub struct GetUsageGuideHandler {
    directory: Arc<dyn DirectoryProvider>,
}

impl GetUsageGuideHandler {
    pub fn new(directory: Arc<dyn DirectoryProvider>) -> Self {
        Self { directory }
    }

    pub async fn handle(&self) -> Result<UsageGuide, DirectoryError> {
        let users = self.directory.list_active_users().await?;

        Ok(UsageGuide {
            description: "API for sending game invitations via Slack".to_string(),
            endpoints: endpoints(),
            users: users.into_iter().map(UserInfo::from).collect(),
        })
    }
}

fn endpoints() -> Vec<EndpointInfo> {
    vec![
        EndpointInfo {
            path: "/invite".to_string(),
            method: "POST".to_string(),
            description: "Send game invitations to specified users".to_string(),
            example: Some(serde_json::json!({
                "game_name": "Chess",
                "user_ids": ["U0123456", "U6543210"],
                "description": "Want to play a quick game of chess?"
            })),
        },
        EndpointInfo {
            path: "/invite".to_string(),
            method: "GET".to_string(),
            description: "Get usage guide and available user IDs".to_string(),
            example: None,
        },
    ]
}
