//! Shared utility functions.

/// Shorten text for log lines, cutting on a character boundary and marking
/// the cut with an ellipsis.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}
