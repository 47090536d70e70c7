//! Canonical display form for cell values.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::NULL_LITERAL;

// First character of every word
static WORD_START_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w").unwrap());

/// True when a cell should not be tallied: missing, blank, or a literal `null`.
pub fn is_blank_or_null(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None => true,
        Some(trimmed) => trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NULL_LITERAL),
    }
}

/// Normalize a cell value for tallying.
///
/// Returns `None` for values that are skipped (see [`is_blank_or_null`]).
/// Otherwise the value is trimmed, lower-cased, and the first character of
/// each word is upper-cased, so `" rEd  shirt "` becomes `"Red Shirt"` and
/// acronyms like `"USA"` become `"Usa"`.
pub fn normalize(value: Option<&str>) -> Option<String> {
    if is_blank_or_null(value) {
        return None;
    }
    let lowered = value?.trim().to_lowercase();
    Some(title_case(&lowered))
}

/// Upper-case the first character of every word in `text`.
///
/// A character whose upper-case form is more than one character (such as
/// `ß`) is left alone, which keeps [`normalize`] idempotent.
pub fn title_case(text: &str) -> String {
    WORD_START_RE
        .replace_all(text, |caps: &Captures| {
            let word_start = &caps[0];
            let mut chars = word_start.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    let mut upper = c.to_uppercase();
                    match (upper.next(), upper.next()) {
                        (Some(u), None) => u.to_string(),
                        _ => word_start.to_string(),
                    }
                }
                _ => word_start.to_string(),
            }
        })
        .into_owned()
}
