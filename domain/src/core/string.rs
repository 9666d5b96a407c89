//! String utilities for the domain layer.

/// Shorten a string to at most `max_chars` characters, appending `...`
/// when anything was cut off.
///
/// Counts characters rather than bytes so multi-byte text never splits
/// mid-character. Used to derive session titles from the first user message.
pub fn ellipsize(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}
