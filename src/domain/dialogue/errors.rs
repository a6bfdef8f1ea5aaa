//! Dialogue rule violations.

use thiserror::Error;

use crate::domain::foundation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialogueError {
    #[error("cannot await a payload without any recipients")]
    NoRecipients,

    #[error("invalid step transition: {0}")]
    InvalidTransition(#[from] ValidationError),
}
