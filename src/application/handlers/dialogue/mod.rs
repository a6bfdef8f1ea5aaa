//! Dialogue handlers - the conversation state machine and the event router
//! that feeds it.

mod advance_dialogue;
mod route_event;

pub use advance_dialogue::{
    AdvanceDialogueCommand, AdvanceDialogueError, AdvanceDialogueHandler, AdvanceDialogueResult,
    DialogueTurn,
};
pub use route_event::{IgnoreReason, RouteEventHandler, RouteOutcome};
