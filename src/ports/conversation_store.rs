//! Conversation Store Port - per-user dialogue state.
//!
//! Every method is one atomic critical section from the caller's point of
//! view, including the existence check in `get_or_create`. Implementations
//! must not hold their lock across anything but map access, and callers
//! must not expect a lock to survive between calls: I/O happens between
//! calls, never inside one.

use async_trait::async_trait;

use crate::domain::dialogue::{ConversationState, DialogueError};
use crate::domain::foundation::UserId;

/// Mutation applied to a stored state under the store's lock.
///
/// If it returns an error the stored state is left as it was.
pub type StateMutation =
    Box<dyn FnOnce(&mut ConversationState) -> Result<(), DialogueError> + Send>;

/// Result of [`ConversationStore::get_or_create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLookup {
    /// No state existed; this fresh one was stored.
    Created(ConversationState),
    /// A dialogue was already in progress.
    Existing(ConversationState),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("conversation store backend error: {0}")]
    Backend(String),

    #[error("state mutation rejected: {0}")]
    Rejected(#[from] DialogueError),
}

#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Copy of the user's state, if any.
    async fn get(&self, user_id: &UserId) -> Result<Option<ConversationState>, StoreError>;

    /// Returns the existing state or atomically creates and stores a new one.
    async fn get_or_create(&self, user_id: &UserId) -> Result<StoreLookup, StoreError>;

    /// Applies `mutation` to the stored state and returns the updated copy.
    ///
    /// Returns `Ok(None)` when the user has no state.
    async fn update(
        &self,
        user_id: &UserId,
        mutation: StateMutation,
    ) -> Result<Option<ConversationState>, StoreError>;

    /// Deletes the user's state, returning it if it existed.
    async fn remove(&self, user_id: &UserId) -> Result<Option<ConversationState>, StoreError>;

    /// Number of dialogues in progress.
    async fn active_count(&self) -> Result<usize, StoreError>;
}
