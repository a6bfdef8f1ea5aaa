//! Slack Web API client.
//!
//! Implements both [`DirectoryProvider`] (`users.list`) and [`Messenger`]
//! (`chat.postMessage`). Slack answers most failures with HTTP 200 and
//! `{"ok": false, "error": "..."}`, so every call checks the `ok` flag.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

use crate::domain::directory::DirectoryEntry;
use crate::ports::{DirectoryError, DirectoryProvider, Messenger, MessengerError};

/// Built-in Slackbot account; never addressable.
const SLACKBOT_ID: &str = "USLACKBOT";

/// Members requested per `users.list` page.
const PAGE_LIMIT: u32 = 200;

/// Slack API configuration.
#[derive(Clone)]
pub struct SlackConfig {
    /// Bot token (xoxb-...).
    bot_token: SecretString,

    /// Base URL for the Web API (default: https://slack.com/api).
    api_base_url: String,

    timeout: Duration,
}

impl SlackConfig {
    pub fn new(bot_token: SecretString) -> Self {
        Self {
            bot_token,
            api_base_url: "https://slack.com/api".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Override the base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlackError {
    #[error("slack request failed: {0}")]
    Http(String),

    #[error("slack api error: {0}")]
    Api(String),

    #[error("failed to decode slack response: {0}")]
    Decode(String),
}

impl From<SlackError> for DirectoryError {
    fn from(err: SlackError) -> Self {
        match err {
            SlackError::Api(code) => DirectoryError::Rejected(code),
            other => DirectoryError::Unavailable(other.to_string()),
        }
    }
}

impl From<SlackError> for MessengerError {
    fn from(err: SlackError) -> Self {
        match err {
            SlackError::Api(code) => MessengerError::Rejected(code),
            other => MessengerError::Transport(other.to_string()),
        }
    }
}

/// Slack Web API adapter.
pub struct SlackClient {
    config: SlackConfig,
    http_client: reqwest::Client,
}

impl SlackClient {
    pub fn new(config: SlackConfig) -> Result<Self, SlackError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SlackError::Http(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn url(&self, method: &str) -> String {
        format!("{}/{}", self.config.api_base_url, method)
    }

    /// Decodes a Web API response and enforces the `ok` flag.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, SlackError> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SlackError::Http(format!("status {}: {}", status, error_text)));
        }

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| SlackError::Decode(e.to_string()))?;

        if !envelope.ok {
            return Err(SlackError::Api(
                envelope.error.unwrap_or_else(|| "unknown_error".to_string()),
            ));
        }

        envelope
            .body
            .ok_or_else(|| SlackError::Decode("missing response body".to_string()))
    }

    async fn users_page(&self, cursor: Option<&str>) -> Result<UsersListPage, SlackError> {
        let mut query = vec![("limit", PAGE_LIMIT.to_string())];
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor.to_string()));
        }

        let response = self
            .http_client
            .get(self.url("users.list"))
            .bearer_auth(self.config.bot_token.expose_secret())
            .query(&query)
            .send()
            .await
            .map_err(|e| SlackError::Http(e.to_string()))?;

        Self::decode(response).await
    }

    /// Every member across all pages, unfiltered.
    pub async fn list_members(&self) -> Result<Vec<SlackMember>, SlackError> {
        let mut members = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self.users_page(cursor.as_deref()).await?;
            members.extend(page.members);

            cursor = page
                .response_metadata
                .map(|m| m.next_cursor)
                .filter(|c| !c.is_empty());
            if cursor.is_none() {
                break;
            }
        }

        tracing::debug!(members = members.len(), "Fetched Slack member list");
        Ok(members)
    }

    pub async fn post_message(&self, channel: &str, text: &str) -> Result<(), SlackError> {
        let response = self
            .http_client
            .post(self.url("chat.postMessage"))
            .bearer_auth(self.config.bot_token.expose_secret())
            .json(&PostMessageRequest { channel, text })
            .send()
            .await
            .map_err(|e| SlackError::Http(e.to_string()))?;

        let posted: PostMessageResponse = Self::decode(response).await?;
        tracing::debug!(channel = %channel, ts = ?posted.ts, "Posted Slack message");
        Ok(())
    }
}

#[async_trait]
impl DirectoryProvider for SlackClient {
    async fn list_active_users(&self) -> Result<Vec<DirectoryEntry>, DirectoryError> {
        let members = self.list_members().await?;
        Ok(members
            .into_iter()
            .filter(SlackMember::is_addressable)
            .map(DirectoryEntry::from)
            .collect())
    }
}

#[async_trait]
impl Messenger for SlackClient {
    async fn send(&self, recipient: &str, text: &str) -> Result<(), MessengerError> {
        self.post_message(recipient, text).await?;
        Ok(())
    }
}

// ----- Slack API Types -----

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(flatten)]
    body: Option<T>,
}

#[derive(Debug, Deserialize)]
struct UsersListPage {
    #[serde(default)]
    members: Vec<SlackMember>,
    #[serde(default)]
    response_metadata: Option<ResponseMetadata>,
}

#[derive(Debug, Deserialize)]
struct ResponseMetadata {
    #[serde(default)]
    next_cursor: String,
}

/// One workspace member as returned by `users.list`.
#[derive(Debug, Clone, Deserialize)]
pub struct SlackMember {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub real_name: Option<String>,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub profile: Option<SlackProfile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlackProfile {
    #[serde(default)]
    pub real_name: Option<String>,
}

impl SlackMember {
    /// Humans that can receive messages.
    pub fn is_addressable(&self) -> bool {
        !self.is_bot && !self.deleted && self.id != SLACKBOT_ID
    }

    /// `real_name`, then `profile.real_name`, then the handle.
    pub fn display_name(&self) -> String {
        let non_empty = |s: &Option<String>| s.clone().filter(|s| !s.trim().is_empty());
        non_empty(&self.real_name)
            .or_else(|| self.profile.as_ref().and_then(|p| non_empty(&p.real_name)))
            .unwrap_or_else(|| self.name.clone())
    }
}

impl From<SlackMember> for DirectoryEntry {
    fn from(member: SlackMember) -> Self {
        let display_name = member.display_name();
        DirectoryEntry::new(member.id, member.name, display_name)
    }
}

#[derive(Debug, Serialize)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    #[serde(default)]
    ts: Option<String>,
}
