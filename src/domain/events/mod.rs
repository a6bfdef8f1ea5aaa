//! Inbound chat events, already decoded from the platform's wire format.

mod inbound;
mod mention;

pub use inbound::{EventKind, InboundEnvelope, InboundEvent};
pub use mention::strip_leading_mention;
