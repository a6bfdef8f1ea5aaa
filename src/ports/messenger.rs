//! Messenger Port - single-recipient text delivery.

use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessengerError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("delivery rejected: {0}")]
    Rejected(String),
}

/// Sends text to a user or channel identifier.
///
/// Used both for dialogue replies (to the originating channel) and for each
/// fan-out recipient. No retries happen behind this trait.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send(&self, recipient: &str, text: &str) -> Result<(), MessengerError>;
}
