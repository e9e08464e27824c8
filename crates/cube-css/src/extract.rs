//! Candidate class-token extraction from content files.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Extraction is deliberately loose: it over-collects from markup, scripts and
//! templates, and anything no rule matches stays inert at compile time.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

static CANDIDATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9-][A-Za-z0-9_\-:\[\]/.%#()]*$").unwrap());

fn is_separator(ch: char) -> bool {
    ch.is_whitespace()
        || matches!(
            ch,
            '"' | '\'' | '`' | '<' | '>' | '=' | '{' | '}' | ';' | ','
        )
}

/// Collect every candidate class token in `text`, sorted and de-duplicated.
///
/// ```
/// use cube_css::extract_tokens;
///
/// let tokens = extract_tokens(r#"<ul class="cluster gutter-s">"#);
/// assert!(tokens.contains("cluster"));
/// assert!(tokens.contains("gutter-s"));
/// assert!(!tokens.contains("\"cluster"));
/// ```
pub fn extract_tokens(text: &str) -> BTreeSet<String> {
    text.split(is_separator)
        .map(|candidate| candidate.trim_end_matches(['.', ':']))
        .filter(|candidate| {
            CANDIDATE.is_match(candidate) && candidate.chars().any(|c| c.is_ascii_alphanumeric())
        })
        .map(str::to_string)
        .collect()
}
