//! Axum router configuration for the invitation API.

use axum::{routing::get, Router};

use super::handlers::{get_usage_guide, send_invite, InviteAppState};

/// # Routes
/// - `GET /invite` - Usage guide and addressable users
/// - `POST /invite` - Send an invitation to a list of user ids
pub fn invite_router() -> Router<InviteAppState> {
    Router::new().route("/invite", get(get_usage_guide).post(send_invite))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::FanOutDispatcher;
    use crate::domain::directory::DirectoryEntry;
    use crate::ports::{DirectoryError, DirectoryProvider, Messenger, MessengerError};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    // ───────────────────────────────────────────────────────────────
    // Mock implementations (minimal for route testing)
    // ───────────────────────────────────────────────────────────────

    struct MockDirectory {
        fail: bool,
    }

    #[async_trait]
    impl DirectoryProvider for MockDirectory {
        async fn list_active_users(&self) -> Result<Vec<DirectoryEntry>, DirectoryError> {
            if self.fail {
                return Err(DirectoryError::Rejected("invalid_auth".to_string()));
            }
            Ok(vec![
                DirectoryEntry::new("U1", "chris99", "Chris Lee"),
                DirectoryEntry::new("U2", "connor_b", "Connor Brown"),
            ])
        }
    }

    #[derive(Default)]
    struct RecordingMessenger {
        sent: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl Messenger for RecordingMessenger {
        async fn send(&self, recipient: &str, text: &str) -> Result<(), MessengerError> {
            if recipient == "UBAD" {
                return Err(MessengerError::Rejected("channel_not_found".to_string()));
            }
            self.sent
                .lock()
                .unwrap()
                .push((recipient.to_string(), text.to_string()));
            Ok(())
        }
    }

    fn app(directory_fails: bool) -> (Router, Arc<RecordingMessenger>) {
        let messenger = Arc::new(RecordingMessenger::default());
        let state = InviteAppState {
            directory: Arc::new(MockDirectory {
                fail: directory_fails,
            }),
            dispatcher: FanOutDispatcher::new(messenger.clone()),
        };
        (invite_router().with_state(state), messenger)
    }

    fn post(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/invite")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get() -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri("/invite")
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // ───────────────────────────────────────────────────────────────
    // Tests
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn post_sends_invitation_to_every_user() {
        let (app, messenger) = app(false);

        let response = app
            .oneshot(post(
                r#"{"game_name":"Chess","user_ids":["U1","U2"],"description":"Quick game?"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["message"],
            "Invitations sent successfully"
        );
        let sent = messenger.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert!(sent
            .iter()
            .all(|(_, text)| text == "Game Invitation: Chess\nQuick game?"));
    }

    #[tokio::test]
    async fn post_reports_failed_users() {
        let (app, _) = app(false);

        let response = app
            .oneshot(post(r#"{"game_name":"Chess","user_ids":["U1","UBAD"]}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Failed to send some invitations");
        assert_eq!(json["details"].as_array().unwrap().len(), 1);
        assert!(json["details"][0].as_str().unwrap().contains("UBAD"));
    }

    #[tokio::test]
    async fn post_without_required_fields_is_bad_request() {
        let (app, messenger) = app(false);

        let response = app
            .oneshot(post(r#"{"user_ids":["U1"]}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
        assert!(messenger.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn post_with_blank_game_name_is_bad_request() {
        let (app, _) = app(false);

        let response = app
            .oneshot(post(r#"{"game_name":"  ","user_ids":["U1"]}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_returns_usage_guide_with_users() {
        let (app, _) = app(false);

        let response = app.oneshot(get()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["endpoints"].as_array().unwrap().len(), 2);
        assert_eq!(json["users"][1]["real_name"], "Connor Brown");
    }

    #[tokio::test]
    async fn get_reports_directory_failure() {
        let (app, _) = app(true);

        let response = app.oneshot(get()).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert!(json["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to fetch users:"));
    }
}
