//! Mention token stripping.

const OPEN_MARKER: &str = "<@";
const CLOSE_MARKER: char = '>';

/// Removes a leading `<@…>` mention token and the whitespace around it.
///
/// Text that does not start with the open marker, or has no close marker
/// after it, is returned unchanged.
pub fn strip_leading_mention(text: &str) -> String {
    let trimmed = text.trim_start();
    if !trimmed.starts_with(OPEN_MARKER) {
        return text.to_string();
    }
    match trimmed.find(CLOSE_MARKER) {
        Some(end) => trimmed[end + CLOSE_MARKER.len_utf8()..].trim().to_string(),
        None => text.to_string(),
    }
}
