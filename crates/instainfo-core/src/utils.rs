//! Small text helpers shared by the core and transport crates.

/// Truncates a string to at most `max_chars` characters, respecting char boundaries.
///
/// # Examples
///
/// ```
/// use instainfo_core::utils::truncate_str;
/// assert_eq!(truncate_str("नमस्ते दुनिया", 6), "नमस्ते");
/// assert_eq!(truncate_str("jack", 10), "jack");
/// ```
#[must_use]
pub fn truncate_str(s: impl AsRef<str>, max_chars: usize) -> String {
    let s = s.as_ref();
    s.char_indices()
        .nth(max_chars)
        .map_or_else(|| s.to_string(), |(pos, _)| s[..pos].to_string())
}
