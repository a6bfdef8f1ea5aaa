//! Slack adapters.
//!
//! - `SlackClient` - Web API client; the bot's DirectoryProvider and Messenger
//! - `webhook_types` - Events API payloads and their mapping to inbound envelopes
//! - `SignatureVerifier` - `v0` request signing check

mod client;
mod signature;
mod webhook_types;

pub use client::{SlackClient, SlackConfig, SlackError, SlackMember, SlackProfile};
pub use signature::{SignatureError, SignatureVerifier, SIGNATURE_HEADER, TIMESTAMP_HEADER};
pub use webhook_types::{parse_envelope, EnvelopeError, SlackEnvelope, SlackEvent};
