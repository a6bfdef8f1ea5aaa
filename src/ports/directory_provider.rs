//! Directory Provider Port - roster lookup.

use async_trait::async_trait;

use crate::domain::directory::DirectoryEntry;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("directory unavailable: {0}")]
    Unavailable(String),

    #[error("directory request rejected: {0}")]
    Rejected(String),
}

/// Source of the current roster.
///
/// Implementations return only active, non-automated accounts, in a stable
/// provider-defined order. Callers fetch a fresh snapshot per resolution
/// attempt; nothing is cached.
#[async_trait]
pub trait DirectoryProvider: Send + Sync {
    async fn list_active_users(&self) -> Result<Vec<DirectoryEntry>, DirectoryError>;
}
