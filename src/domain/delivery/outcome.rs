//! Fan-out delivery outcome.

use serde::Serialize;
use std::fmt;

/// One recipient the message could not be delivered to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryFailure {
    pub recipient: String,
    pub reason: String,
}

impl DeliveryFailure {
    pub fn new(recipient: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for DeliveryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to send message to user {}: {}",
            self.recipient, self.reason
        )
    }
}

/// Result of sending one message to N recipients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeliveryOutcome {
    pub attempted: usize,
    pub failures: Vec<DeliveryFailure>,
}

impl DeliveryOutcome {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn delivered(&self) -> usize {
        self.attempted - self.failures.len()
    }

    /// Human-readable error descriptions, each naming its recipient.
    pub fn error_descriptions(&self) -> Vec<String> {
        self.failures.iter().map(ToString::to_string).collect()
    }
}
