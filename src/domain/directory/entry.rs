//! Directory entry value object.

use serde::{Deserialize, Serialize};

/// One addressable human account, as returned by the directory provider.
///
/// Providers hand out entries already filtered (no automated or deactivated
/// accounts) and in their own stable order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Opaque, stable account identifier used for delivery.
    pub identifier: String,
    /// Short handle (e.g. `chris99`).
    pub handle: String,
    /// Human-readable display name (e.g. `Chris Lee`).
    pub display_name: String,
}

impl DirectoryEntry {
    pub fn new(
        identifier: impl Into<String>,
        handle: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            handle: handle.into(),
            display_name: display_name.into(),
        }
    }

    /// Case-insensitive substring test against handle or display name.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn contains_lowercase(&self, needle: &str) -> bool {
        self.handle.to_lowercase().contains(needle)
            || self.display_name.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_matches_handle_or_display_name() {
        let entry = DirectoryEntry::new("U1", "chris99", "Chris Lee");
        assert!(entry.contains_lowercase("chris"));
        assert!(entry.contains_lowercase("lee"));
        assert!(entry.contains_lowercase("s99"));
        assert!(!entry.contains_lowercase("dave"));
    }

    #[test]
    fn empty_needle_matches_everything() {
        let entry = DirectoryEntry::new("U1", "x", "Y");
        assert!(entry.contains_lowercase(""));
    }
}
