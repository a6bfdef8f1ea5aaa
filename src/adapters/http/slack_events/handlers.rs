//! HTTP handler for the Slack Events API endpoint.
//!
//! Every payload that verifies and parses is acknowledged with `200`, even
//! when the dialogue fails downstream, so Slack does not redeliver it.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use http::StatusCode;

use crate::adapters::slack::{
    parse_envelope, EnvelopeError, SignatureError, SignatureVerifier, SIGNATURE_HEADER,
    TIMESTAMP_HEADER,
};
use crate::application::handlers::{RouteEventHandler, RouteOutcome};

use super::dto::{ChallengeResponse, ErrorResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SlackEventsAppState {
    pub router: Arc<RouteEventHandler>,
    /// Present when a signing secret is configured.
    pub verifier: Option<SignatureVerifier>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /slack/events
pub async fn handle_slack_event(
    State(state): State<SlackEventsAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, EventsApiError> {
    if let Some(verifier) = &state.verifier {
        let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
        verifier.verify(header(TIMESTAMP_HEADER), header(SIGNATURE_HEADER), &body)?;
    }

    let envelope = parse_envelope(&body)?;

    match state.router.handle(envelope).await {
        RouteOutcome::Handshake(challenge) => {
            Ok(Json(ChallengeResponse { challenge }).into_response())
        }
        _ => Ok(StatusCode::OK.into_response()),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum EventsApiError {
    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}

impl IntoResponse for EventsApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self {
            EventsApiError::Signature(_) => (StatusCode::UNAUTHORIZED, "INVALID_SIGNATURE"),
            EventsApiError::Envelope(_) => (StatusCode::BAD_REQUEST, "MALFORMED_PAYLOAD"),
        };

        tracing::warn!(error = %self, status = %status, "Rejected Slack event delivery");

        (status, Json(ErrorResponse::new(error_code, self.to_string()))).into_response()
    }
}
