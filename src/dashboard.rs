//! The recompute step: one dataset and one search input in, one view model out.
//!
//! [`build`] is pure. It knows nothing about the store or about HTML, which
//! keeps every rule of the page testable in isolation. The web layer calls it
//! once per request and hands the result to [`crate::outputs::html`].

use crate::aggregate::{TOP_DOMAIN_LIMIT, monthly_counts, summarize, top_domains};
use crate::models::{Article, DomainCount, MonthCount, Summary};
use crate::search::{STROKE_KEYWORD, filter_keyword, search_query, search_titles};
use crate::text::title_corpus;
use crate::wordcloud::{WordCloud, build_word_cloud};
use tracing::{info, instrument, warn};

/// View model for one render.
#[derive(Debug)]
pub enum Dashboard<'a> {
    /// The collection is empty; only a warning is shown.
    Empty,
    Ready(Box<Report<'a>>),
}

/// Everything the page shows for a non-empty dataset.
#[derive(Debug)]
pub struct Report<'a> {
    pub summary: Summary,
    pub articles: &'a [Article],
    /// Empty when no article has a usable release date.
    pub monthly: Vec<MonthCount>,
    pub top_domains: Vec<DomainCount>,
    /// `None` when there are no titles or no word survives filtering.
    pub word_cloud: Option<WordCloud>,
    pub search: Search<'a>,
    /// Articles mentioning [`STROKE_KEYWORD`] in title or body.
    pub keyword_matches: Vec<&'a Article>,
}

/// State of the free-text search section.
#[derive(Debug)]
pub enum Search<'a> {
    /// No input; the section stays collapsed and nothing is filtered.
    Inactive,
    /// A search ran; `matches` may be empty.
    Results { matches: Vec<&'a Article> },
}

/// Build the view model for a dataset and optional search input.
///
/// An empty dataset short-circuits to [`Dashboard::Empty`] before any
/// aggregate is computed.
#[instrument(level = "info", skip_all, fields(count = articles.len(), query = ?query))]
pub fn build<'a>(articles: &'a [Article], query: Option<&str>) -> Dashboard<'a> {
    if articles.is_empty() {
        warn!("No articles in the collection; skipping render");
        return Dashboard::Empty;
    }

    let summary = summarize(articles);
    let monthly = monthly_counts(articles);
    let top_domains = top_domains(articles, TOP_DOMAIN_LIMIT);
    let word_cloud = title_corpus(articles.iter().map(|a| a.title.as_deref()))
        .and_then(|corpus| build_word_cloud(&corpus));

    let search = match search_query(query) {
        Some(query) => Search::Results {
            matches: search_titles(articles, query),
        },
        None => Search::Inactive,
    };
    let keyword_matches = filter_keyword(articles, STROKE_KEYWORD);

    info!(
        total = summary.total,
        domains = summary.distinct_domains,
        months = monthly.len(),
        cloud_words = word_cloud.as_ref().map_or(0, |c| c.words.len()),
        keyword_matches = keyword_matches.len(),
        "Dashboard built"
    );

    Dashboard::Ready(Box::new(Report {
        summary,
        articles,
        monthly,
        top_domains,
        word_cloud,
        search,
        keyword_matches,
    }))
}
