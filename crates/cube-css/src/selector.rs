//! Class selector escaping.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Follows the serialization rules of `CSS.escape()` so that any requested
//! class token, including ones with variant prefixes or fractions such as
//! `md:flow` or `w-1/2`, becomes a valid class selector.

/// Escape a string for use as a CSS identifier.
///
/// ```
/// use cube_css::escape_identifier;
///
/// assert_eq!(escape_identifier("flow"), "flow");
/// assert_eq!(escape_identifier("2xl"), "\\32 xl");
/// assert_eq!(escape_identifier("md:flow"), "md\\:flow");
/// ```
pub fn escape_identifier(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len());
    let first = ident.chars().next();
    let single_dash = ident == "-";

    for (index, ch) in ident.chars().enumerate() {
        match ch {
            '\0' => out.push('\u{FFFD}'),
            '\u{1}'..='\u{1f}' | '\u{7f}' => push_code_point(&mut out, ch),
            '0'..='9' if index == 0 => push_code_point(&mut out, ch),
            '0'..='9' if index == 1 && first == Some('-') => push_code_point(&mut out, ch),
            '-' if single_dash => out.push_str("\\-"),
            c if !c.is_ascii() || c == '-' || c == '_' || c.is_ascii_alphanumeric() => out.push(c),
            c => {
                out.push('\\');
                out.push(c);
            }
        }
    }

    out
}

/// Whether a captured token fragment is safe to splice into a CSS value as
/// part of an identifier (`var(--space-<suffix>)`).
pub fn is_identifier_fragment(fragment: &str) -> bool {
    !fragment.is_empty()
        && fragment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// The class selector for a requested token: `.` followed by the escaped token.
pub fn class_selector(token: &str) -> String {
    format!(".{}", escape_identifier(token))
}

fn push_code_point(out: &mut String, ch: char) {
    out.push_str(&format!("\\{:x} ", ch as u32));
}
