//! Slack configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Slack configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SlackConfig {
    /// Bot user OAuth token (xoxb-...)
    pub bot_token: SecretString,

    /// Signing secret for inbound request verification
    pub signing_secret: Option<SecretString>,

    /// Web API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl SlackConfig {
    /// Signing secret, if one is configured and non-empty
    pub fn signing_secret(&self) -> Option<&SecretString> {
        self.signing_secret
            .as_ref()
            .filter(|s| !s.expose_secret().trim().is_empty())
    }

    /// Validate Slack configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let token = self.bot_token.expose_secret();
        if token.is_empty() {
            return Err(ValidationError::MissingRequired("SLACK_BOT_TOKEN"));
        }
        if !token.starts_with("xoxb-") {
            return Err(ValidationError::InvalidSlackToken);
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(ValidationError::InvalidSlackBaseUrl);
        }
        if *environment == Environment::Production && self.signing_secret().is_none() {
            return Err(ValidationError::SigningSecretRequired);
        }
        Ok(())
    }
}

fn default_api_base_url() -> String {
    "https://slack.com/api".to_string()
}
