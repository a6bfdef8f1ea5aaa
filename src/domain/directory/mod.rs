//! Directory module - roster entries and free-text name resolution.

mod entry;
mod matcher;

pub use entry::DirectoryEntry;
pub use matcher::{match_names, parse_fragments, MatchReport, MatchedRecipient};
