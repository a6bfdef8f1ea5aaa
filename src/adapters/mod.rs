//! Adapters - Implementations of ports for external systems.
//!
//! - `slack` - Slack Web API client and Events API payloads
//! - `ai` - Composer implementations (OpenAI, mock)
//! - `storage` - In-memory ConversationStore
//! - `http` - Axum routers for the Slack events and invitation endpoints

pub mod ai;
pub mod http;
pub mod slack;
pub mod storage;

pub use ai::{MockComposer, OpenAIComposer, OpenAIConfig};
pub use slack::{SignatureVerifier, SlackClient, SlackConfig};
pub use storage::InMemoryConversationStore;
