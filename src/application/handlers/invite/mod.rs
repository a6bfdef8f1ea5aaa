//! Invitation API handlers.

mod get_usage_guide;
mod send_invite;

pub use get_usage_guide::{EndpointInfo, GetUsageGuideHandler, UsageGuide, UserInfo};
pub use send_invite::{SendInviteCommand, SendInviteHandler, SendInviteResult};
