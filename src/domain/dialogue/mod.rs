//! Dialogue module - per-user conversation state and its configuration.
//!
//! A dialogue walks `AwaitingRecipients -> AwaitingPayload` and is then
//! deleted. The handler driving it lives in
//! `application::handlers::dialogue`; this module only holds the rules.

mod config;
mod errors;
mod state;
mod step;

pub use config::{DialogueConfig, DialoguePreset, PayloadMode, PromptTemplates};
pub use errors::DialogueError;
pub use state::ConversationState;
pub use step::DialogueStep;
