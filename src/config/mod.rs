//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `INVITE_BOT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use invite_bot::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod ai;
mod dialogue;
mod error;
mod server;
mod slack;

pub use ai::AiConfig;
pub use dialogue::DialogueSettings;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use slack::SlackConfig;

use serde::Deserialize;

use crate::domain::dialogue::PayloadMode;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Slack credentials and API location
    pub slack: SlackConfig,

    /// Composer provider configuration (OpenAI)
    #[serde(default)]
    pub ai: AiConfig,

    /// Dialogue preset and overrides
    #[serde(default)]
    pub dialogue: DialogueSettings,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `INVITE_BOT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `INVITE_BOT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `INVITE_BOT__SLACK__BOT_TOKEN=xoxb-...` -> `slack.bot_token = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("INVITE_BOT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.slack.validate(&self.server.environment)?;
        self.dialogue.validate()?;
        self.ai.validate(self.composer_required())?;
        Ok(())
    }

    /// True when the dialogue hands payloads to the composer
    pub fn composer_required(&self) -> bool {
        self.dialogue.payload_mode() == PayloadMode::Composed
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
