//! HTTP handlers for the invitation API.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use http::StatusCode;

use crate::application::handlers::{FanOutDispatcher, GetUsageGuideHandler, SendInviteHandler};
use crate::ports::{DirectoryError, DirectoryProvider};

use super::dto::{InviteErrorResponse, InviteRequest, InviteResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct InviteAppState {
    pub directory: Arc<dyn DirectoryProvider>,
    pub dispatcher: FanOutDispatcher,
}

impl InviteAppState {
    pub fn send_invite_handler(&self) -> SendInviteHandler {
        SendInviteHandler::new(self.dispatcher.clone())
    }

    pub fn usage_guide_handler(&self) -> GetUsageGuideHandler {
        GetUsageGuideHandler::new(self.directory.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /invite
pub async fn send_invite(
    State(state): State<InviteAppState>,
    payload: Result<Json<InviteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, InviteApiError> {
    let Json(request) = payload.map_err(|e| InviteApiError::BadRequest(e.body_text()))?;

    if request.game_name.trim().is_empty() {
        return Err(InviteApiError::BadRequest(
            "game_name must not be empty".to_string(),
        ));
    }

    let outcome = state.send_invite_handler().handle(request.into()).await;

    if !outcome.is_success() {
        return Err(InviteApiError::DeliveryFailed(outcome.error_descriptions()));
    }

    Ok(Json(InviteResponse {
        message: "Invitations sent successfully".to_string(),
    }))
}

/// GET /invite
pub async fn get_usage_guide(
    State(state): State<InviteAppState>,
) -> Result<impl IntoResponse, InviteApiError> {
    let guide = state.usage_guide_handler().handle().await?;
    Ok(Json(guide))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum InviteApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Failed to send some invitations")]
    DeliveryFailed(Vec<String>),

    #[error("Failed to fetch users: {0}")]
    Directory(#[from] DirectoryError),
}

impl IntoResponse for InviteApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match self {
            InviteApiError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, InviteErrorResponse::new(message))
            }
            InviteApiError::DeliveryFailed(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                InviteErrorResponse::with_details(message, details),
            ),
            InviteApiError::Directory(ref e) => {
                tracing::error!(error = %e, "Usage guide directory fetch failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    InviteErrorResponse::new(message),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
