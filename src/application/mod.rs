//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The dialogue handlers own the conversation flow; the invite handlers serve
//! the direct invitation API.

pub mod handlers;

pub use handlers::{
    AdvanceDialogueCommand, AdvanceDialogueHandler, DialogueTurn, FanOutDispatcher,
    GetUsageGuideHandler, RouteEventHandler, RouteOutcome, SendInviteCommand, SendInviteHandler,
};
