//! Slack Events API payload types.
//!
//! Only the fields the router needs are modelled; everything else in the
//! payload is ignored.

use serde::Deserialize;

use crate::domain::events::{EventKind, InboundEnvelope, InboundEvent};

// ════════════════════════════════════════════════════════════════════════════════
// Envelope
// ════════════════════════════════════════════════════════════════════════════════

/// Outer Events API delivery.
///
/// ```text
/// {"type": "url_verification", "challenge": "..."}
/// {"type": "event_callback", "event": {...}}
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SlackEnvelope {
    #[serde(rename = "type")]
    pub envelope_type: String,

    #[serde(default)]
    pub challenge: Option<String>,

    #[serde(default)]
    pub event: Option<SlackEvent>,
}

/// Inner event of an `event_callback` delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct SlackEvent {
    #[serde(rename = "type")]
    pub event_type: String,

    #[serde(default)]
    pub user: String,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub channel: String,

    /// `im` for direct messages.
    #[serde(default)]
    pub channel_type: Option<String>,

    #[serde(default)]
    pub bot_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
    #[error("malformed event payload: {0}")]
    Malformed(String),

    #[error("{0} envelope is missing its '{1}' field")]
    MissingField(&'static str, &'static str),
}

impl SlackEvent {
    /// Maps the Slack event type onto the bot's event kinds.
    pub fn kind(&self) -> Option<EventKind> {
        match self.event_type.as_str() {
            "app_mention" => Some(EventKind::Mention),
            "message" if self.channel_type.as_deref() == Some("im") => {
                Some(EventKind::DirectMessage)
            }
            "message" => Some(EventKind::Message),
            _ => None,
        }
    }
}

impl From<SlackEvent> for InboundEvent {
    fn from(event: SlackEvent) -> Self {
        Self {
            kind: event.kind(),
            raw_type: event.event_type,
            user: event.user,
            text: event.text,
            channel: event.channel,
            bot_id: event.bot_id.unwrap_or_default(),
        }
    }
}

impl TryFrom<SlackEnvelope> for InboundEnvelope {
    type Error = EnvelopeError;

    fn try_from(envelope: SlackEnvelope) -> Result<Self, Self::Error> {
        match envelope.envelope_type.as_str() {
            "url_verification" => envelope
                .challenge
                .map(|challenge| InboundEnvelope::Handshake { challenge })
                .ok_or(EnvelopeError::MissingField("url_verification", "challenge")),
            "event_callback" => envelope
                .event
                .map(|event| InboundEnvelope::Event(event.into()))
                .ok_or(EnvelopeError::MissingField("event_callback", "event")),
            _ => Ok(InboundEnvelope::Unsupported(envelope.envelope_type)),
        }
    }
}

/// Parses a raw request body into an [`InboundEnvelope`].
pub fn parse_envelope(body: &[u8]) -> Result<InboundEnvelope, EnvelopeError> {
    let envelope: SlackEnvelope =
        serde_json::from_slice(body).map_err(|e| EnvelopeError::Malformed(e.to_string()))?;
    envelope.try_into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_verification_becomes_handshake() {
        let body = br#"{"token":"t","challenge":"abc123","type":"url_verification"}"#;
        assert_eq!(
            parse_envelope(body).unwrap(),
            InboundEnvelope::Handshake {
                challenge: "abc123".to_string()
            }
        );
    }

    #[test]
    fn url_verification_without_challenge_is_rejected() {
        let body = br#"{"type":"url_verification"}"#;
        assert_eq!(
            parse_envelope(body),
            Err(EnvelopeError::MissingField("url_verification", "challenge"))
        );
    }

    #[test]
    fn direct_message_event_is_classified() {
        let body = br#"{
            "type": "event_callback",
            "team_id": "T1",
            "event": {
                "type": "message",
                "channel_type": "im",
                "user": "U0",
                "text": "hi",
                "channel": "D1",
                "ts": "1355517523.000005"
            }
        }"#;

        let InboundEnvelope::Event(event) = parse_envelope(body).unwrap() else {
            panic!("expected event");
        };
        assert_eq!(event.kind, Some(EventKind::DirectMessage));
        assert_eq!(event.user, "U0");
        assert_eq!(event.channel, "D1");
        assert!(!event.is_from_automation());
    }

    #[test]
    fn mention_and_channel_message_are_classified() {
        let mention = SlackEvent {
            event_type: "app_mention".to_string(),
            user: "U0".to_string(),
            text: "<@UBOT> hi".to_string(),
            channel: "C1".to_string(),
            channel_type: None,
            bot_id: None,
        };
        assert_eq!(mention.kind(), Some(EventKind::Mention));

        let message = SlackEvent {
            event_type: "message".to_string(),
            channel_type: Some("channel".to_string()),
            ..mention.clone()
        };
        assert_eq!(message.kind(), Some(EventKind::Message));

        let reaction = SlackEvent {
            event_type: "reaction_added".to_string(),
            ..mention
        };
        assert_eq!(reaction.kind(), None);
    }

    #[test]
    fn bot_messages_carry_bot_id() {
        let body = br#"{"type":"event_callback","event":{"type":"message","bot_id":"B1","text":"x","channel":"C1"}}"#;
        let InboundEnvelope::Event(event) = parse_envelope(body).unwrap() else {
            panic!("expected event");
        };
        assert!(event.is_from_automation());
        assert!(event.user.is_empty());
    }

    #[test]
    fn other_envelope_types_are_unsupported() {
        let body = br#"{"type":"app_rate_limited","minute_rate_limited":1518467820}"#;
        assert_eq!(
            parse_envelope(body).unwrap(),
            InboundEnvelope::Unsupported("app_rate_limited".to_string())
        );
    }

    #[test]
    fn invalid_json_is_malformed() {
        assert!(matches!(
            parse_envelope(b"not json"),
            Err(EnvelopeError::Malformed(_))
        ));
        assert!(matches!(
            parse_envelope(br#"{"challenge":"x"}"#),
            Err(EnvelopeError::Malformed(_))
        ));
    }
}
