//! OpenAI Composer - Implementation of Composer over the chat completions API.
//!
//! Sends the rendered prompt as a single user message and returns the first
//! choice's content, trimmed.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_model("gpt-3.5-turbo")
//!     .with_max_tokens(50);
//!
//! let composer = OpenAIComposer::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{Composer, ComposerError};

/// Configuration for the OpenAI composer.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gpt-3.5-turbo").
    pub model: String,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Completion length cap.
    pub max_tokens: u32,
}

impl OpenAIConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-3.5-turbo".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(60),
            max_tokens: 50,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI chat completions composer.
pub struct OpenAIComposer {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIComposer {
    /// Creates a new composer with the given configuration.
    pub fn new(config: OpenAIConfig) -> Result<Self, ComposerError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ComposerError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn to_openai_request(&self, prompt: &str) -> OpenAIRequest {
        OpenAIRequest {
            model: self.config.model.clone(),
            messages: vec![OpenAIMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: self.config.max_tokens,
        }
    }

    async fn send_request(&self, prompt: &str) -> Result<Response, ComposerError> {
        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&self.to_openai_request(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ComposerError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    ComposerError::network(format!("Connection failed: {}", e))
                } else {
                    ComposerError::network(e.to_string())
                }
            })
    }

    /// Maps non-success statuses to composer errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, ComposerError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(map_status(status.as_u16(), error_body))
    }
}

fn map_status(status: u16, error_body: String) -> ComposerError {
    match status {
        401 => ComposerError::AuthenticationFailed,
        429 => ComposerError::rate_limited(parse_retry_after(&error_body)),
        400 => ComposerError::InvalidRequest(error_body),
        500..=599 => {
            ComposerError::unavailable(format!("Server error {}: {}", status, error_body))
        }
        _ => ComposerError::network(format!("Unexpected status {}: {}", status, error_body)),
    }
}

/// Pulls "try again in Ns" out of a rate-limit body, defaulting to 30.
fn parse_retry_after(error_body: &str) -> u32 {
    const MARKER: &str = "try again in ";

    serde_json::from_str::<serde_json::Value>(error_body)
        .ok()
        .and_then(|parsed| {
            let message = parsed.get("error")?.get("message")?.as_str()?.to_string();
            let rest = &message[message.find(MARKER)? + MARKER.len()..];
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse::<u32>().ok()
        })
        .unwrap_or(30)
}

fn first_choice(response: OpenAIResponse) -> Result<String, ComposerError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ComposerError::parse("No choices in response"))?;

    let content = choice.message.content.trim().to_string();
    if content.is_empty() {
        return Err(ComposerError::parse("Empty completion"));
    }
    Ok(content)
}

#[async_trait]
impl Composer for OpenAIComposer {
    async fn generate(&self, prompt: &str) -> Result<String, ComposerError> {
        let response = self.send_request(prompt).await?;
        let response = self.handle_response_status(response).await?;

        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| ComposerError::parse(format!("Failed to parse response: {}", e)))?;

        let content = first_choice(openai_response)?;
        tracing::debug!(model = %self.config.model, chars = content.len(), "Composed message");
        Ok(content)
    }
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_works() {
        let config = OpenAIConfig::new("test-key")
            .with_model("gpt-4o")
            .with_base_url("https://custom.api.com")
            .with_timeout(Duration::from_secs(30))
            .with_max_tokens(120);

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, "https://custom.api.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_tokens, 120);
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn defaults_match_invitation_use() {
        let config = OpenAIConfig::new("k");
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.max_tokens, 50);
    }

    #[test]
    fn request_carries_prompt_as_single_user_message() {
        let composer = OpenAIComposer::new(OpenAIConfig::new("k")).unwrap();
        let json = serde_json::to_value(composer.to_openai_request("invite them")).unwrap();

        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["max_tokens"], 50);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "invite them");
    }

    #[test]
    fn completions_url_tolerates_trailing_slash() {
        let composer =
            OpenAIComposer::new(OpenAIConfig::new("k").with_base_url("http://localhost:9/v1/"))
                .unwrap();
        assert_eq!(composer.completions_url(), "http://localhost:9/v1/chat/completions");
    }

    #[test]
    fn status_codes_map_to_errors() {
        assert_eq!(map_status(401, String::new()), ComposerError::AuthenticationFailed);
        assert!(matches!(
            map_status(503, "down".into()),
            ComposerError::Unavailable { .. }
        ));
        assert!(matches!(
            map_status(400, "bad".into()),
            ComposerError::InvalidRequest(_)
        ));
        assert!(matches!(map_status(418, String::new()), ComposerError::Network(_)));
    }

    #[test]
    fn retry_after_is_parsed_from_message() {
        let body = r#"{"error":{"message":"Rate limit reached. Please try again in 20s."}}"#;
        assert_eq!(parse_retry_after(body), 20);
        assert_eq!(parse_retry_after("not json"), 30);
    }

    #[test]
    fn first_choice_is_trimmed() {
        let response: OpenAIResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"  Let's play!\n"}}]}"#,
        )
        .unwrap();
        assert_eq!(first_choice(response).unwrap(), "Let's play!");
    }

    #[test]
    fn empty_choices_is_parse_error() {
        let response: OpenAIResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(first_choice(response), Err(ComposerError::Parse(_))));
    }
}
