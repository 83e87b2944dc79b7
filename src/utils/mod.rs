//! Common utilities and helper functions
//!
//! This module provides shared utilities used across the application.

pub mod error;

use regex::Regex;
use std::sync::OnceLock;

/// Collapse runs of whitespace into single spaces and trim both ends
pub fn normalize_whitespace(text: &str) -> String {
    static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();

    let re = WHITESPACE_RE.get_or_init(|| Regex::new(r"\s+").expect("Invalid regex pattern"));

    re.replace_all(text.trim(), " ").to_string()
}

/// Make a string safe to embed in a file name
///
/// Every character outside `[a-zA-Z0-9_-]` becomes `_`.
pub fn sanitize_filename(component: &str) -> String {
    static UNSAFE_CHARS: OnceLock<Regex> = OnceLock::new();

    let re = UNSAFE_CHARS
        .get_or_init(|| Regex::new(r"[^a-zA-Z0-9_-]").expect("Invalid regex pattern"));

    re.replace_all(component, "_").to_string()
}

/// Check that a string is non-empty and made only of ASCII digits
pub fn is_ascii_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}
