//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid Slack bot token format (expected xoxb-...)")]
    InvalidSlackToken,

    #[error("Slack API base URL must be an http(s) URL")]
    InvalidSlackBaseUrl,

    #[error("Slack signing secret is required in production")]
    SigningSecretRequired,

    #[error("Composer max_tokens must be between 1 and 4096")]
    InvalidMaxTokens,

    #[error("Unknown event kind in dialogue configuration: {0}")]
    InvalidEventKind(String),

    #[error("Dialogue must accept at least one event kind")]
    NoEventKinds,
}
