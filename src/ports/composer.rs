//! Composer Port - Interface for text-generation providers.
//!
//! The dialogue hands the composer a fully rendered prompt (sender name,
//! recipient names, payload) and sends whatever comes back. A composer
//! failure ends the dialogue, so errors are surfaced verbatim and never
//! retried here.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct Shouty;
//!
//! #[async_trait]
//! impl Composer for Shouty {
//!     async fn generate(&self, prompt: &str) -> Result<String, ComposerError> {
//!         Ok(prompt.to_uppercase())
//!     }
//! }
//! ```

use async_trait::async_trait;

/// Port for text generation.
#[async_trait]
pub trait Composer: Send + Sync {
    /// Generate message text for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, ComposerError>;
}

/// Composer errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComposerError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Provider rejected the request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },

    /// No provider credentials were configured.
    #[error("composer not configured: {0}")]
    NotConfigured(String),
}

impl ComposerError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
