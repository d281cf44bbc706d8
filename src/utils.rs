//! Utility functions for string handling and safe HTML output.
//!
//! This module provides helper functions used throughout the application:
//! - Character-safe truncation for excerpts and log previews
//! - Slugification for in-page section anchors
//! - HTML escaping and link sanitizing for user data

use quick_xml::escape::escape;
use std::borrow::Cow;
use url::Url;

/// Keep the first `max` characters of a string.
///
/// Unlike byte slicing this never splits a multi-byte character.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_chars("stroke", 3), "str");
/// assert_eq!(truncate_chars("é", 5), "é");
/// ```
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` characters with an ellipsis and a
/// count of the characters left out.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 chars)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let kept = truncate_chars(s, max);
    if kept.len() == s.len() {
        s.to_string()
    } else {
        format!("{}…(+{} chars)", kept, s[kept.len()..].chars().count())
    }
}

/// Convert a heading to an anchor slug.
///
/// Lowercases the text, drops everything except letters, digits, spaces and
/// hyphens, and replaces spaces with hyphens.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(slugify_title("Artikel per Bulan"), "artikel-per-bulan");
/// ```
pub fn slugify_title(title: &str) -> String {
    title
        .trim()
        .to_lowercase()
        .replace(|c: char| !c.is_alphanumeric() && c != ' ' && c != '-', "")
        .trim()
        .replace(' ', "-")
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    escape(text)
}

/// Return the URL when it is an absolute `http` or `https` link.
///
/// Anything else (relative paths, `javascript:` and other schemes, garbage)
/// is rendered as plain text instead of a link.
pub fn safe_href(url: &str) -> Option<Url> {
    Url::parse(url.trim())
        .ok()
        .filter(|parsed| matches!(parsed.scheme(), "http" | "https"))
}
