//! Platform-neutral view of an inbound event delivery.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// How the message reached the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The bot was @-mentioned in a channel.
    Mention,
    /// A one-to-one conversation with the bot.
    DirectMessage,
    /// Any other message the bot can see.
    Message,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventKind::Mention => "mention",
            EventKind::DirectMessage => "direct_message",
            EventKind::Message => "message",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for EventKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "mention" => Ok(EventKind::Mention),
            "direct_message" => Ok(EventKind::DirectMessage),
            "message" => Ok(EventKind::Message),
            other => Err(ValidationError::invalid_format(
                "event_kind",
                format!("unknown event kind '{}'", other),
            )),
        }
    }
}

/// One chat event.
///
/// Identifiers are kept as raw strings here; the router validates them
/// before anything reaches the dialogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    /// `None` when the platform sent an event type the bot does not handle.
    pub kind: Option<EventKind>,
    /// Platform event type as received (for logging).
    pub raw_type: String,
    pub user: String,
    pub text: String,
    pub channel: String,
    /// Non-empty when the message was posted by an automation.
    pub bot_id: String,
}

impl InboundEvent {
    pub fn is_from_automation(&self) -> bool {
        !self.bot_id.is_empty()
    }
}

/// Top-level delivery from the event source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEnvelope {
    /// Endpoint ownership check; the token must be echoed back.
    Handshake { challenge: String },
    /// A chat event.
    Event(InboundEvent),
    /// Any other envelope type; acknowledged and ignored.
    Unsupported(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kind_parses_config_names() {
        assert_eq!("mention".parse::<EventKind>().unwrap(), EventKind::Mention);
        assert_eq!(
            " direct_message ".parse::<EventKind>().unwrap(),
            EventKind::DirectMessage
        );
        assert!("reaction".parse::<EventKind>().is_err());
    }

    #[test]
    fn event_kind_display_round_trips_through_from_str() {
        for kind in [EventKind::Mention, EventKind::DirectMessage, EventKind::Message] {
            assert_eq!(kind.to_string().parse::<EventKind>().unwrap(), kind);
        }
    }

    #[test]
    fn bot_id_marks_automation() {
        let mut event = InboundEvent {
            kind: Some(EventKind::Message),
            raw_type: "message".to_string(),
            user: "U1".to_string(),
            text: "hi".to_string(),
            channel: "D1".to_string(),
            bot_id: String::new(),
        };
        assert!(!event.is_from_automation());
        event.bot_id = "B9".to_string();
        assert!(event.is_from_automation());
    }
}
