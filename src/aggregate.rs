//! Descriptive statistics over a normalized dataset.
//!
//! All aggregates are recomputed from scratch on every render; nothing here
//! holds state between requests.
//!
//! # Ordering
//!
//! - Monthly counts are ordered by month, oldest first.
//! - Domain counts are ordered by count, highest first, with equal counts
//!   broken by domain name in ascending lexicographic order. The top-N view
//!   is therefore deterministic regardless of store order.

use crate::models::{Article, DomainCount, MonthCount, Summary};
use chrono::Datelike;
use itertools::Itertools;
use std::cmp::Reverse;

/// Number of domains shown in the bar chart.
pub const TOP_DOMAIN_LIMIT: usize = 5;

/// Total articles and distinct domains.
pub fn summarize(articles: &[Article]) -> Summary {
    Summary {
        total: articles.len(),
        distinct_domains: articles.iter().map(|a| a.domain.as_str()).unique().count(),
    }
}

/// Count articles per calendar month of their parsed release date.
///
/// Articles without a parsed date are skipped. An empty result means no
/// article has a usable date.
pub fn monthly_counts(articles: &[Article]) -> Vec<MonthCount> {
    articles
        .iter()
        .filter_map(|a| a.parsed_date)
        .map(|date| (date.year(), date.month()))
        .counts()
        .into_iter()
        .sorted_unstable_by_key(|&(key, _)| key)
        .map(|((year, month), count)| MonthCount {
            month: format!("{year:04}-{month:02}"),
            count,
        })
        .collect()
}

/// Count articles per domain, most frequent first.
pub fn domain_counts(articles: &[Article]) -> Vec<DomainCount> {
    articles
        .iter()
        .map(|a| a.domain.as_str())
        .counts()
        .into_iter()
        .sorted_unstable_by_key(|&(domain, count)| (Reverse(count), domain))
        .map(|(domain, count)| DomainCount {
            domain: domain.to_string(),
            count,
        })
        .collect()
}

/// The `limit` domains with the most articles.
pub fn top_domains(articles: &[Article], limit: usize) -> Vec<DomainCount> {
    let mut counts = domain_counts(articles);
    counts.truncate(limit);
    counts
}
