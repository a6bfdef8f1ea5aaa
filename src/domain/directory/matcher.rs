//! Name Matcher - resolves free-text name fragments against a directory snapshot.
//!
//! Matching is first-match-wins: for each fragment the entries are scanned in
//! provider order and the first entry whose handle or display name contains
//! the fragment (case-insensitively) is selected. There is no scoring, and a
//! fragment that is empty after trimming binds to the first entry.

use serde::Serialize;

use super::DirectoryEntry;

/// A fragment that resolved to a directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedRecipient {
    pub identifier: String,
    pub display_name: String,
}

impl MatchedRecipient {
    pub fn new(identifier: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: display_name.into(),
        }
    }
}

impl From<&DirectoryEntry> for MatchedRecipient {
    fn from(entry: &DirectoryEntry) -> Self {
        Self::new(entry.identifier.clone(), entry.display_name.clone())
    }
}

/// Result of one match run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchReport {
    /// Resolved recipients, in input fragment order. Not deduplicated.
    pub matched: Vec<MatchedRecipient>,
    /// Trimmed fragments that matched nothing, in input order.
    pub unmatched: Vec<String>,
    /// Display names of every directory entry, for diagnostic replies.
    pub valid_names: Vec<String>,
}

impl MatchReport {
    /// True when every fragment resolved.
    pub fn is_complete(&self) -> bool {
        self.unmatched.is_empty()
    }
}

/// Splits raw recipient input on commas and trims each fragment.
///
/// Empty fragments are kept; callers decide what an all-blank input means.
pub fn parse_fragments(text: &str) -> Vec<String> {
    text.split(',').map(|f| f.trim().to_string()).collect()
}

/// Matches each fragment against `directory`, which is never mutated.
pub fn match_names<S: AsRef<str>>(fragments: &[S], directory: &[DirectoryEntry]) -> MatchReport {
    let mut report = MatchReport {
        valid_names: directory.iter().map(|e| e.display_name.clone()).collect(),
        ..Default::default()
    };

    for fragment in fragments {
        let fragment = fragment.as_ref().trim();
        let needle = fragment.to_lowercase();

        match directory.iter().find(|entry| entry.contains_lowercase(&needle)) {
            Some(entry) => report.matched.push(MatchedRecipient::from(entry)),
            None => report.unmatched.push(fragment.to_string()),
        }
    }

    report
}
