//! Invite Bot server binary.

use std::sync::Arc;

use secrecy::ExposeSecret;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use invite_bot::adapters::http::{app_router, InviteAppState, SlackEventsAppState};
use invite_bot::adapters::{
    InMemoryConversationStore, OpenAIComposer, OpenAIConfig, SignatureVerifier, SlackClient,
    SlackConfig,
};
use invite_bot::application::handlers::{
    AdvanceDialogueHandler, FanOutDispatcher, RouteEventHandler,
};
use invite_bot::config::AppConfig;
use invite_bot::ports::Composer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let slack = Arc::new(SlackClient::new(
        SlackConfig::new(config.slack.bot_token.clone())
            .with_base_url(config.slack.api_base_url.clone()),
    )?);

    let composer: Option<Arc<dyn Composer>> = match &config.ai.openai_api_key {
        Some(key) if config.ai.has_openai() => {
            let openai = OpenAIConfig::new(key.expose_secret().clone())
                .with_model(config.ai.model.clone())
                .with_base_url(config.ai.base_url.clone())
                .with_timeout(config.ai.timeout())
                .with_max_tokens(config.ai.max_tokens);
            Some(Arc::new(OpenAIComposer::new(openai)?))
        }
        _ => None,
    };

    let dialogue_config = config.dialogue.to_dialogue_config()?;
    tracing::info!(
        preset = ?config.dialogue.preset,
        payload_mode = ?dialogue_config.payload_mode,
        event_kinds = ?dialogue_config.accepted_event_kinds,
        composer = composer.is_some(),
        "Dialogue configured"
    );

    let store = Arc::new(InMemoryConversationStore::new());
    let dialogue = AdvanceDialogueHandler::new(
        store,
        slack.clone(),
        slack.clone(),
        composer,
        dialogue_config,
    );

    let verifier = config.slack.signing_secret().cloned().map(SignatureVerifier::new);
    if verifier.is_none() {
        tracing::warn!("No Slack signing secret configured; event requests are not verified");
    }

    let events_state = SlackEventsAppState {
        router: Arc::new(RouteEventHandler::new(Arc::new(dialogue))),
        verifier,
    };
    let invite_state = InviteAppState {
        directory: slack.clone(),
        dispatcher: FanOutDispatcher::new(slack),
    };

    let app = app_router(events_state, invite_state, config.server.request_timeout());

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, environment = ?config.server.environment, "Invite bot listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// JSON logs in production, human-readable text elsewhere.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}
