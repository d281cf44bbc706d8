//! Keyword views over the dataset.
//!
//! Two listings share the same matching rule, a case-insensitive literal
//! substring test:
//!
//! - [`search_titles`]: free-text search against titles only
//! - [`filter_keyword`]: a fixed keyword against title or body
//!
//! Missing fields never match.

use crate::models::Article;
use crate::utils::truncate_chars;

/// Keyword for the fixed topic listing.
pub const STROKE_KEYWORD: &str = "stroke";

/// Body excerpt length in the fixed topic listing, in characters.
pub const EXCERPT_CHARS: usize = 300;

/// Placeholder for missing dates and bodies.
pub const NOT_AVAILABLE: &str = "Tidak tersedia";

/// Case-insensitive substring test. `needle` must already be lowercase.
fn contains_folded(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|text| text.to_lowercase().contains(needle))
}

/// Decide whether raw search input is a search at all.
///
/// Blank or whitespace-only input means "no search". Anything else is
/// returned exactly as typed, surrounding spaces included, so `" stroke"`
/// only matches where a word starts with "stroke" after a space.
pub fn search_query(input: Option<&str>) -> Option<&str> {
    input.filter(|query| !query.trim().is_empty())
}

/// Articles whose title contains `query`, ignoring case.
pub fn search_titles<'a>(articles: &'a [Article], query: &str) -> Vec<&'a Article> {
    let needle = query.to_lowercase();
    articles
        .iter()
        .filter(|a| contains_folded(a.title.as_deref(), &needle))
        .collect()
}

/// Articles whose title or body contains `keyword`, ignoring case.
pub fn filter_keyword<'a>(articles: &'a [Article], keyword: &str) -> Vec<&'a Article> {
    let needle = keyword.to_lowercase();
    articles
        .iter()
        .filter(|a| {
            contains_folded(a.title.as_deref(), &needle)
                || contains_folded(a.body.as_deref(), &needle)
        })
        .collect()
}

/// First [`EXCERPT_CHARS`] characters of a body followed by `...`.
pub fn excerpt(body: Option<&str>) -> String {
    match body {
        Some(text) => format!("{}...", truncate_chars(text, EXCERPT_CHARS)),
        None => NOT_AVAILABLE.to_string(),
    }
}
