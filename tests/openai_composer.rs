//! OpenAIComposer against a mock chat completions endpoint.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use invite_bot::adapters::{OpenAIComposer, OpenAIConfig};
use invite_bot::ports::{Composer, ComposerError};

fn composer(server: &MockServer) -> OpenAIComposer {
    let config = OpenAIConfig::new("sk-test")
        .with_base_url(format!("{}/v1", server.uri()))
        .with_timeout(Duration::from_secs(5));
    OpenAIComposer::new(config).unwrap()
}

#[tokio::test]
async fn generate_returns_trimmed_first_choice() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-3.5-turbo",
            "max_tokens": 50,
            "messages": [{"role": "user", "content": "Invite Chris to Chess"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "  Chris, fancy a game of Chess?\n"},
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = composer(&server)
        .generate("Invite Chris to Chess")
        .await
        .unwrap();

    assert_eq!(text, "Chris, fancy a game of Chess?");
}

#[tokio::test]
async fn rate_limit_reads_retry_hint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"message": "Rate limit reached. Please try again in 7s."}
        })))
        .mount(&server)
        .await;

    let err = composer(&server).generate("hi").await.unwrap_err();

    assert_eq!(err, ComposerError::RateLimited { retry_after_secs: 7 });
}

#[tokio::test]
async fn unauthorized_maps_to_authentication_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = composer(&server).generate("hi").await.unwrap_err();

    assert_eq!(err, ComposerError::AuthenticationFailed);
}

#[tokio::test]
async fn empty_choice_list_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let err = composer(&server).generate("hi").await.unwrap_err();

    assert!(matches!(err, ComposerError::Parse(_)));
}
