//! HTTP adapter for Slack Events API deliveries.

mod dto;
mod handlers;
mod routes;

pub use dto::{ChallengeResponse, ErrorResponse};
pub use handlers::{handle_slack_event, EventsApiError, SlackEventsAppState};
pub use routes::{slack_events_router, slack_events_routes};
