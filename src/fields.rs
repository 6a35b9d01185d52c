//! Field name and literal normalization.

/// Drops a table qualifier: `users.salary` -> `salary`.
pub fn strip_qualifier(path: &str) -> &str {
    match path.rfind('.') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Drops one pair of surrounding quotes (`'`, `"` or `` ` ``).
pub fn strip_quotes(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && matches!(first, b'\'' | b'"' | b'`') {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// Bare field name for aggregations: qualifier and quotes stripped.
pub fn bare_field(path: &str) -> String {
    strip_quotes(strip_qualifier(strip_quotes(path.trim()))).to_string()
}

/// Value text of a SQL literal: single-quoted strings lose their quotes and
/// `''` escapes collapse; everything else is returned unchanged.
pub fn literal_value(text: &str) -> String {
    if text.len() >= 2 && text.starts_with('\'') && text.ends_with('\'') {
        text[1..text.len() - 1].replace("''", "'")
    } else {
        text.to_string()
    }
}
