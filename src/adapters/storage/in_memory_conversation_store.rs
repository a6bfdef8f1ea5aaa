//! In-Memory Conversation Store Adapter
//!
//! Keeps every dialogue in a single `HashMap` guarded by one mutex. Each
//! trait method takes the lock once, touches only the map, and releases it
//! before returning.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::dialogue::ConversationState;
use crate::domain::foundation::UserId;
use crate::ports::{ConversationStore, StateMutation, StoreError, StoreLookup};

/// In-memory storage for dialogue state
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationStore {
    states: Arc<Mutex<HashMap<UserId, ConversationState>>>,
}

impl InMemoryConversationStore {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every dialogue (useful for tests)
    pub async fn clear(&self) {
        self.states.lock().await.clear();
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<ConversationState>, StoreError> {
        Ok(self.states.lock().await.get(user_id).cloned())
    }

    async fn get_or_create(&self, user_id: &UserId) -> Result<StoreLookup, StoreError> {
        let mut states = self.states.lock().await;
        if let Some(existing) = states.get(user_id) {
            return Ok(StoreLookup::Existing(existing.clone()));
        }

        let state = ConversationState::new();
        states.insert(user_id.clone(), state.clone());
        Ok(StoreLookup::Created(state))
    }

    async fn update(
        &self,
        user_id: &UserId,
        mutation: StateMutation,
    ) -> Result<Option<ConversationState>, StoreError> {
        let mut states = self.states.lock().await;
        let Some(stored) = states.get_mut(user_id) else {
            return Ok(None);
        };

        // Mutate a copy so a rejected mutation leaves the stored state intact.
        let mut next = stored.clone();
        mutation(&mut next)?;
        *stored = next.clone();
        Ok(Some(next))
    }

    async fn remove(&self, user_id: &UserId) -> Result<Option<ConversationState>, StoreError> {
        Ok(self.states.lock().await.remove(user_id))
    }

    async fn active_count(&self) -> Result<usize, StoreError> {
        Ok(self.states.lock().await.len())
    }
}
