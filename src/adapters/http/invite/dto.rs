//! Request/response DTOs for the invitation API.

use serde::{Deserialize, Serialize};

use crate::application::handlers::SendInviteCommand;

/// Body of `POST /invite`.
#[derive(Debug, Clone, Deserialize)]
pub struct InviteRequest {
    pub game_name: String,
    pub user_ids: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<InviteRequest> for SendInviteCommand {
    fn from(req: InviteRequest) -> Self {
        Self {
            game_name: req.game_name,
            user_ids: req.user_ids,
            description: req.description,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InviteResponse {
    pub message: String,
}

/// Error body, shaped `{"error": ..., "details": [...]}`.
#[derive(Debug, Clone, Serialize)]
pub struct InviteErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl InviteErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: Vec<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details),
        }
    }
}
