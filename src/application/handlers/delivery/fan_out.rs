//! FanOutDispatcher - sends one message to many recipients concurrently.

use futures::future::join_all;
use std::sync::Arc;

use crate::domain::delivery::{DeliveryFailure, DeliveryOutcome};
use crate::ports::Messenger;

/// Concurrent fan-out with error aggregation.
///
/// All sends are started together and awaited as a group; every failure is
/// collected instead of short-circuiting. There are no retries and no
/// timeout beyond the messenger's own.
#[derive(Clone)]
pub struct FanOutDispatcher {
    messenger: Arc<dyn Messenger>,
}

impl FanOutDispatcher {
    pub fn new(messenger: Arc<dyn Messenger>) -> Self {
        Self { messenger }
    }

    pub async fn deliver<S: AsRef<str>>(&self, recipients: &[S], message: &str) -> DeliveryOutcome {
        let sends = recipients.iter().map(|recipient| {
            let recipient = recipient.as_ref();
            async move {
                self.messenger
                    .send(recipient, message)
                    .await
                    .map_err(|e| DeliveryFailure::new(recipient, e.to_string()))
            }
        });

        let failures: Vec<DeliveryFailure> = join_all(sends)
            .await
            .into_iter()
            .filter_map(Result::err)
            .collect();

        for failure in &failures {
            tracing::warn!(recipient = %failure.recipient, reason = %failure.reason, "Delivery failed");
        }
        tracing::info!(
            attempted = recipients.len(),
            failed = failures.len(),
            "Fan-out delivery finished"
        );

        DeliveryOutcome {
            attempted: recipients.len(),
            failures,
        }
    }
}
