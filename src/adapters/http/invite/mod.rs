//! HTTP adapter for the direct invitation API.

mod dto;
mod handlers;
mod routes;

pub use dto::{InviteErrorResponse, InviteRequest, InviteResponse};
pub use handlers::{get_usage_guide, send_invite, InviteApiError, InviteAppState};
pub use routes::invite_router;
