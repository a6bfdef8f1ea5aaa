//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod delivery;
pub mod dialogue;
pub mod invite;

pub use delivery::FanOutDispatcher;
pub use dialogue::{
    // Conversation state machine
    AdvanceDialogueCommand,
    AdvanceDialogueError,
    AdvanceDialogueHandler,
    AdvanceDialogueResult,
    DialogueTurn,
    // Event router
    IgnoreReason,
    RouteEventHandler,
    RouteOutcome,
};
pub use invite::{
    EndpointInfo, GetUsageGuideHandler, SendInviteCommand, SendInviteHandler, SendInviteResult,
    UsageGuide, UserInfo,
};
