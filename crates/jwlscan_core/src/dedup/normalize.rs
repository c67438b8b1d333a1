//! Text normalization for keys and display.
//!
//! `normalize_text` is the only transform that feeds equivalence keys.
//! `truncate_chars` and `flatten_line_breaks` shape previews and must never
//! influence grouping.

use once_cell::sync::Lazy;
use regex::Regex;

static LINE_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r\n|\r|\n").expect("valid line break regex"));

/// Collapses an absent text field to the empty string.
///
/// Present values are returned unchanged: no trimming, case change or
/// encoding transform.
pub fn normalize_text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

/// Keeps the first `max_chars` characters (Unicode scalar values).
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((byte_index, _)) => value[..byte_index].to_string(),
        None => value.to_string(),
    }
}

/// Replaces every line break (`\r\n`, `\r`, `\n`) with a single space.
pub fn flatten_line_breaks(value: &str) -> String {
    LINE_BREAK_RE.replace_all(value, " ").into_owned()
}
