//! End-to-end dialogue tests through the HTTP surface.
//!
//! Signed Slack deliveries go through the full router; the directory and
//! messenger are in-process fakes, the conversation store is the real
//! in-memory adapter.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use secrecy::SecretString;
use serde_json::json;
use tower::ServiceExt;

use invite_bot::adapters::http::{app_router, InviteAppState, SlackEventsAppState};
use invite_bot::adapters::{InMemoryConversationStore, MockComposer, SignatureVerifier};
use invite_bot::application::handlers::{
    AdvanceDialogueHandler, FanOutDispatcher, RouteEventHandler,
};
use invite_bot::domain::dialogue::{DialogueConfig, DialoguePreset};
use invite_bot::domain::directory::DirectoryEntry;
use invite_bot::ports::{
    ConversationStore, DirectoryError, DirectoryProvider, Messenger, MessengerError,
};

const SIGNING_SECRET: &str = "test-signing-secret";

// ─────────────────────────────────────────────────────────────────────────────
// Fakes
// ─────────────────────────────────────────────────────────────────────────────

struct Workspace;

#[async_trait]
impl DirectoryProvider for Workspace {
    async fn list_active_users(&self) -> Result<Vec<DirectoryEntry>, DirectoryError> {
        Ok(vec![
            DirectoryEntry::new("U0", "alex", "Alex Kim"),
            DirectoryEntry::new("U1", "chris99", "Chris Lee"),
            DirectoryEntry::new("U2", "connor_b", "Connor Brown"),
        ])
    }
}

#[derive(Default)]
struct Outbox {
    sent: Mutex<Vec<(String, String)>>,
}

impl Outbox {
    fn to(&self, recipient: &str) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(to, _)| to == recipient)
            .map(|(_, text)| text.clone())
            .collect()
    }
}

#[async_trait]
impl Messenger for Outbox {
    async fn send(&self, recipient: &str, text: &str) -> Result<(), MessengerError> {
        self.sent
            .lock()
            .unwrap()
            .push((recipient.to_string(), text.to_string()));
        Ok(())
    }
}

struct Harness {
    app: Router,
    store: Arc<InMemoryConversationStore>,
    outbox: Arc<Outbox>,
    composer: MockComposer,
    verifier: SignatureVerifier,
}

fn harness(preset: DialoguePreset) -> Harness {
    let store = Arc::new(InMemoryConversationStore::new());
    let outbox = Arc::new(Outbox::default());
    let composer = MockComposer::new().with_response("Alex invites you to a round of Chess!");
    let verifier = SignatureVerifier::new(SecretString::new(SIGNING_SECRET.to_string()));

    let dialogue = AdvanceDialogueHandler::new(
        store.clone(),
        Arc::new(Workspace),
        outbox.clone(),
        Some(Arc::new(composer.clone())),
        DialogueConfig::from_preset(preset),
    );

    let events = SlackEventsAppState {
        router: Arc::new(RouteEventHandler::new(Arc::new(dialogue))),
        verifier: Some(verifier.clone()),
    };
    let invite = InviteAppState {
        directory: Arc::new(Workspace),
        dispatcher: FanOutDispatcher::new(outbox.clone()),
    };

    Harness {
        app: app_router(events, invite, Duration::from_secs(5)),
        store,
        outbox,
        composer,
        verifier,
    }
}

impl Harness {
    async fn deliver(&self, payload: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let body = payload.to_string();
        let timestamp = chrono::Utc::now().timestamp();
        let signature = self
            .verifier
            .signature_for(timestamp, body.as_bytes())
            .unwrap();

        let request = Request::builder()
            .method("POST")
            .uri("/slack/events")
            .header("content-type", "application/json")
            .header("x-slack-request-timestamp", timestamp.to_string())
            .header("x-slack-signature", signature)
            .body(Body::from(body))
            .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    async fn direct_message(&self, text: &str) -> StatusCode {
        self.deliver(json!({
            "type": "event_callback",
            "event": {
                "type": "message",
                "channel_type": "im",
                "user": "U0",
                "text": text,
                "channel": "D100"
            }
        }))
        .await
        .0
    }

    async fn mention(&self, text: &str) -> StatusCode {
        self.deliver(json!({
            "type": "event_callback",
            "event": {
                "type": "app_mention",
                "user": "U0",
                "text": text,
                "channel": "C500"
            }
        }))
        .await
        .0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn url_verification_echoes_challenge() {
    let h = harness(DialoguePreset::GameInvite);

    let (status, json) = h
        .deliver(json!({"type": "url_verification", "challenge": "abc123"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["challenge"], "abc123");
}

#[tokio::test]
async fn game_invite_dialogue_runs_to_completion() {
    let h = harness(DialoguePreset::GameInvite);

    assert_eq!(h.direct_message("hey bot").await, StatusCode::OK);
    assert_eq!(h.store.active_count().await.unwrap(), 1);
    assert!(h.outbox.to("D100")[0].starts_with("Hi! Who do you want to message?"));

    assert_eq!(h.direct_message("chri, conn").await, StatusCode::OK);
    let confirmation = h.outbox.to("D100")[1].clone();
    assert!(confirmation.contains("Chris Lee"));
    assert!(confirmation.contains("Connor Brown"));

    assert_eq!(h.direct_message("Chess").await, StatusCode::OK);

    assert_eq!(
        h.outbox.to("U1"),
        vec!["Alex invites you to a round of Chess!".to_string()]
    );
    assert_eq!(
        h.outbox.to("U2"),
        vec!["Alex invites you to a round of Chess!".to_string()]
    );
    assert_eq!(h.outbox.to("D100").last().unwrap(), "Invitation sent successfully!");

    let prompts = h.composer.calls();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Alex Kim"));
    assert!(prompts[0].contains("Chess"));

    assert_eq!(h.store.active_count().await.unwrap(), 0);
}

#[tokio::test]
async fn unmatched_names_keep_the_dialogue_waiting() {
    let h = harness(DialoguePreset::GameInvite);

    h.direct_message("hi").await;
    h.direct_message("chris, zelda").await;

    let reply = h.outbox.to("D100")[1].clone();
    assert!(reply.contains("zelda"));
    assert!(reply.contains("Valid names are"));
    assert_eq!(h.store.active_count().await.unwrap(), 1);

    h.direct_message("chris").await;
    assert!(h.outbox.to("D100")[2].contains("Chris Lee"));
    assert!(h.outbox.to("U1").is_empty());
}

#[tokio::test]
async fn question_relay_forwards_mention_verbatim() {
    let h = harness(DialoguePreset::QuestionRelay);

    h.mention("<@UBOT> hello").await;
    h.mention("<@UBOT> connor").await;
    h.mention("<@UBOT> Lunch at noon?").await;

    assert_eq!(h.outbox.to("U2"), vec!["Lunch at noon?".to_string()]);
    assert_eq!(h.composer.call_count(), 0);
    assert_eq!(h.store.active_count().await.unwrap(), 0);
}

#[tokio::test]
async fn direct_messages_are_ignored_by_mention_preset() {
    let h = harness(DialoguePreset::QuestionRelay);

    assert_eq!(h.direct_message("hi").await, StatusCode::OK);

    assert!(h.outbox.sent.lock().unwrap().is_empty());
    assert_eq!(h.store.active_count().await.unwrap(), 0);
}

#[tokio::test]
async fn unsigned_delivery_is_rejected() {
    let h = harness(DialoguePreset::GameInvite);

    let request = Request::builder()
        .method("POST")
        .uri("/slack/events")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"type": "url_verification", "challenge": "x"}).to_string(),
        ))
        .unwrap();

    let response = h.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invite_endpoint_shares_the_messenger() {
    let h = harness(DialoguePreset::GameInvite);

    let request = Request::builder()
        .method("POST")
        .uri("/invite")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"game_name": "Go", "user_ids": ["U1"]}).to_string(),
        ))
        .unwrap();

    let response = h.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(h.outbox.to("U1"), vec!["Game Invitation: Go".to_string()]);
}
