//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the dialogue engine and the outside world. Adapters implement these ports.
//!
//! - `DirectoryProvider` - roster of addressable human accounts
//! - `Messenger` - delivers one text message to one recipient
//! - `Composer` - turns a prompt into generated message text
//! - `ConversationStore` - per-user dialogue state, one critical section per call

mod composer;
mod conversation_store;
mod directory_provider;
mod messenger;

pub use composer::{Composer, ComposerError};
pub use conversation_store::{ConversationStore, StateMutation, StoreError, StoreLookup};
pub use directory_provider::{DirectoryError, DirectoryProvider};
pub use messenger::{Messenger, MessengerError};
