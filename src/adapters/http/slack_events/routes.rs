//! Axum router configuration for the Slack Events endpoint.

use axum::{routing::post, Router};

use super::handlers::{handle_slack_event, SlackEventsAppState};

/// # Routes
/// - `POST /events` - Slack Events API deliveries (handshake and event callbacks)
pub fn slack_events_routes() -> Router<SlackEventsAppState> {
    Router::new().route("/events", post(handle_slack_event))
}

/// Mounted at `/slack`.
pub fn slack_events_router() -> Router<SlackEventsAppState> {
    Router::new().nest("/slack", slack_events_routes())
}
