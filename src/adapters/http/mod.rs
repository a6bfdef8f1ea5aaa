//! HTTP adapters - the bot's inbound surface.
//!
//! - `slack_events` - `POST /slack/events` (Events API deliveries)
//! - `invite` - `GET|POST /invite` (direct invitation API)

pub mod invite;
pub mod slack_events;

use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use invite::{invite_router, InviteAppState};
pub use slack_events::{slack_events_router, SlackEventsAppState};

/// Complete application router with request tracing and a per-request timeout.
pub fn app_router(
    events: SlackEventsAppState,
    invite: InviteAppState,
    request_timeout: Duration,
) -> Router {
    Router::new()
        .merge(slack_events_router().with_state(events))
        .merge(invite_router().with_state(invite))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}
