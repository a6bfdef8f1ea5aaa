//! Mock Composer for testing.
//!
//! Scripted implementation of the Composer port so dialogue tests can run
//! without calling a real model.
//!
//! # Example
//!
//! ```ignore
//! let composer = MockComposer::new()
//!     .with_response("Fancy a round of chess?")
//!     .with_error(ComposerError::unavailable("overloaded"));
//!
//! assert_eq!(composer.generate("p").await?, "Fancy a round of chess?");
//! assert!(composer.generate("p").await.is_err());
//! assert_eq!(composer.calls(), vec!["p", "p"]);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{Composer, ComposerError};

/// Mock composer for testing.
///
/// Responses are consumed in order; once the queue is empty every call
/// echoes a fixed default. Clones share the queue and the call history.
#[derive(Debug, Clone, Default)]
pub struct MockComposer {
    responses: Arc<Mutex<VecDeque<Result<String, ComposerError>>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        lock(&self.responses).push_back(Ok(content.into()));
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: ComposerError) -> Self {
        lock(&self.responses).push_back(Err(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Prompts received so far, oldest first.
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl Composer for MockComposer {
    async fn generate(&self, prompt: &str) -> Result<String, ComposerError> {
        lock(&self.calls).push(prompt.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = lock(&self.responses).pop_front();
        next.unwrap_or_else(|| Ok("Mock invitation".to_string()))
    }
}
