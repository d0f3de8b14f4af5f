//! String utilities

/// Truncate a string to at most `max_chars` characters, adding "..." if truncated
///
/// Counts Unicode scalar values, so multi-byte text is never split.
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_pos, _)) => format!("{}...", &s[..byte_pos]),
        None => s.to_string(),
    }
}

/// Case-insensitive ASCII prefix test that never panics on char boundaries
pub fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
}
