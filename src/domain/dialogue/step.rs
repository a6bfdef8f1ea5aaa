//! Dialogue step enum.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Where a user currently is in the dialogue.
///
/// Completion is not a step: a finished dialogue is removed from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueStep {
    /// Waiting for a comma-separated list of names.
    #[default]
    AwaitingRecipients,
    /// Recipients resolved, waiting for the payload text.
    AwaitingPayload,
}

impl StateMachine for DialogueStep {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (DialogueStep::AwaitingRecipients, DialogueStep::AwaitingRecipients)
                | (DialogueStep::AwaitingRecipients, DialogueStep::AwaitingPayload)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            DialogueStep::AwaitingRecipients => vec![
                DialogueStep::AwaitingRecipients,
                DialogueStep::AwaitingPayload,
            ],
            DialogueStep::AwaitingPayload => vec![],
        }
    }
}

impl fmt::Display for DialogueStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DialogueStep::AwaitingRecipients => "awaiting_recipients",
            DialogueStep::AwaitingPayload => "awaiting_payload",
        };
        write!(f, "{}", s)
    }
}
