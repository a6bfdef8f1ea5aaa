//! Composer Adapters.
//!
//! Implementations of the Composer port.
//!
//! ## Available Adapters
//!
//! - `OpenAIComposer` - OpenAI chat completions (gpt-3.5-turbo by default)
//! - `MockComposer` - Scripted composer for testing

mod mock_composer;
mod openai_composer;

pub use mock_composer::MockComposer;
pub use openai_composer::{OpenAIComposer, OpenAIConfig};
