//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the state machine trait and validation errors
//! that form the vocabulary of the invite bot domain.

mod errors;
mod ids;
mod state_machine;

pub use errors::ValidationError;
pub use ids::{ChannelId, DialogueId, UserId};
pub use state_machine::StateMachine;
