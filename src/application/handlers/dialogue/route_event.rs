//! RouteEventHandler - classifies inbound deliveries and feeds the dialogue.
//!
//! Handshakes are answered without touching the store. Automation-posted
//! events, events of a kind this deployment does not accept, and events
//! without a sender are dropped before any state is read.

use std::sync::Arc;

use super::{AdvanceDialogueCommand, AdvanceDialogueHandler, DialogueTurn};
use crate::domain::events::{strip_leading_mention, EventKind, InboundEnvelope, InboundEvent};
use crate::domain::foundation::{ChannelId, UserId};

/// Why an event was acknowledged without advancing any dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    FromAutomation,
    UnsupportedEnvelope,
    UnsupportedEventType,
    KindNotAccepted,
    MissingSender,
    MissingChannel,
}

/// Outcome of routing one envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Echo this token back to the event source.
    Handshake(String),
    /// Event reached the dialogue.
    Dispatched(DialogueTurn),
    /// Dialogue handling failed; already logged.
    Failed,
    Ignored(IgnoreReason),
}

pub struct RouteEventHandler {
    dialogue: Arc<AdvanceDialogueHandler>,
}

impl RouteEventHandler {
    pub fn new(dialogue: Arc<AdvanceDialogueHandler>) -> Self {
        Self { dialogue }
    }

    /// Routes one envelope. Never fails: downstream errors are logged and
    /// the delivery is still acknowledged so the source does not redeliver.
    pub async fn handle(&self, envelope: InboundEnvelope) -> RouteOutcome {
        match envelope {
            InboundEnvelope::Handshake { challenge } => {
                tracing::info!("Answering endpoint verification handshake");
                RouteOutcome::Handshake(challenge)
            }
            InboundEnvelope::Unsupported(envelope_type) => {
                tracing::debug!(envelope_type = %envelope_type, "Ignoring unsupported envelope");
                RouteOutcome::Ignored(IgnoreReason::UnsupportedEnvelope)
            }
            InboundEnvelope::Event(event) => self.route(event).await,
        }
    }

    async fn route(&self, event: InboundEvent) -> RouteOutcome {
        if event.is_from_automation() {
            tracing::debug!(bot_id = %event.bot_id, "Ignoring automation-posted event");
            return RouteOutcome::Ignored(IgnoreReason::FromAutomation);
        }

        let Some(kind) = event.kind else {
            tracing::debug!(event_type = %event.raw_type, "Ignoring unsupported event type");
            return RouteOutcome::Ignored(IgnoreReason::UnsupportedEventType);
        };

        if !self.dialogue.config().accepts(kind) {
            tracing::debug!(kind = %kind, "Ignoring event kind not accepted by this dialogue");
            return RouteOutcome::Ignored(IgnoreReason::KindNotAccepted);
        }

        let Ok(user_id) = UserId::new(event.user) else {
            tracing::debug!(kind = %kind, "Ignoring event without a sender");
            return RouteOutcome::Ignored(IgnoreReason::MissingSender);
        };

        let Ok(channel_id) = ChannelId::new(event.channel) else {
            tracing::warn!(user_id = %user_id, "Ignoring event without a channel");
            return RouteOutcome::Ignored(IgnoreReason::MissingChannel);
        };

        let text = match kind {
            EventKind::Mention => strip_leading_mention(&event.text),
            EventKind::DirectMessage | EventKind::Message => event.text,
        };

        let cmd = AdvanceDialogueCommand {
            user_id: user_id.clone(),
            channel_id,
            text,
        };

        match self.dialogue.handle(cmd).await {
            Ok(result) => RouteOutcome::Dispatched(result.turn),
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "Dialogue handling failed");
                RouteOutcome::Failed
            }
        }
    }
}
