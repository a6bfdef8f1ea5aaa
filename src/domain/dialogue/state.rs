//! Per-user conversation state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DialogueError, DialogueStep};
use crate::domain::directory::MatchedRecipient;
use crate::domain::foundation::{DialogueId, StateMachine};

/// State of one user's dialogue.
///
/// Recipients are kept as (identifier, display name) pairs, so the id and
/// name sequences handed out by [`recipient_ids`](Self::recipient_ids) and
/// [`recipient_names`](Self::recipient_names) are always index-aligned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    id: DialogueId,
    step: DialogueStep,
    recipients: Vec<(String, String)>,
    sender_name: Option<String>,
    started_at: DateTime<Utc>,
}

impl ConversationState {
    /// Fresh state at `AwaitingRecipients`.
    pub fn new() -> Self {
        Self {
            id: DialogueId::new(),
            step: DialogueStep::AwaitingRecipients,
            recipients: Vec::new(),
            sender_name: None,
            started_at: Utc::now(),
        }
    }

    pub fn id(&self) -> DialogueId {
        self.id
    }

    pub fn step(&self) -> DialogueStep {
        self.step
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Display name of the user who started the dialogue, if the directory knew them.
    pub fn sender_name(&self) -> Option<&str> {
        self.sender_name.as_deref()
    }

    pub fn recipient_ids(&self) -> Vec<String> {
        self.recipients.iter().map(|(id, _)| id.clone()).collect()
    }

    pub fn recipient_names(&self) -> Vec<String> {
        self.recipients.iter().map(|(_, name)| name.clone()).collect()
    }

    /// Stores the resolved recipients and advances to `AwaitingPayload`.
    ///
    /// Recipients are kept exactly as matched, in input order; a person named
    /// twice is stored twice. On error the state is left untouched.
    pub fn resolve_recipients(
        &mut self,
        matched: &[MatchedRecipient],
        sender_name: Option<String>,
    ) -> Result<(), DialogueError> {
        if matched.is_empty() {
            return Err(DialogueError::NoRecipients);
        }
        let next = self.step.transition_to(DialogueStep::AwaitingPayload)?;

        self.recipients = matched
            .iter()
            .map(|r| (r.identifier.clone(), r.display_name.clone()))
            .collect();
        self.sender_name = sender_name;
        self.step = next;
        Ok(())
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}
