//! Data models for stored articles and the aggregates derived from them.
//!
//! This module defines the core data structures used throughout the dashboard:
//! - [`RawArticle`]: A document exactly as it comes out of the article collection
//! - [`Article`]: A normalized record with canonical fields and derived values
//! - [`MonthCount`], [`DomainCount`]: Aggregates recomputed on every render
//! - [`Summary`]: Headline metrics for the top of the page
//!
//! The collection is filled by an external crawler that writes Indonesian
//! field names (`judul`, `konten`, `tanggal_rilis`), hence the serde renames.

use chrono::NaiveDateTime;
use mongodb::bson::Bson;
use serde::Deserialize;

/// A raw article document as stored by the crawler.
///
/// No schema is enforced on the collection, so every field may be missing or
/// hold an unexpected BSON type. Values are kept as [`Bson`] and converted
/// to text during normalization with [`bson_text`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArticle {
    /// The document identifier, normally an `ObjectId`.
    #[serde(rename = "_id", default)]
    pub id: Option<Bson>,
    /// The article headline.
    #[serde(rename = "judul", default)]
    pub title: Option<Bson>,
    /// The full article text.
    #[serde(rename = "konten", default)]
    pub body: Option<Bson>,
    /// The release date as written by the source site.
    #[serde(rename = "tanggal_rilis", default)]
    pub release_date: Option<Bson>,
    /// The URL the article was scraped from.
    #[serde(default)]
    pub url: Option<Bson>,
}

/// A normalized article with canonical field names and derived values.
///
/// Normalization never drops a record: malformed inputs degrade to `None`
/// or to the `"Unknown"` domain sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    /// Document identifier in text form (hex for `ObjectId`s).
    pub id: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    /// The release date string exactly as stored, kept for display.
    pub release_date: Option<String>,
    pub url: Option<String>,
    /// `release_date` parsed permissively; `None` when it could not be read.
    pub parsed_date: Option<NaiveDateTime>,
    /// Network location of `url`, or `"Unknown"`.
    pub domain: String,
}

/// Number of articles released in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCount {
    /// Month key in `YYYY-MM` form.
    pub month: String,
    pub count: usize,
}

/// Number of articles published by one domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainCount {
    pub domain: String,
    pub count: usize,
}

/// Headline metrics shown above the charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Number of articles in the dataset.
    pub total: usize,
    /// Number of distinct domains, `"Unknown"` included.
    pub distinct_domains: usize,
}

/// Convert an optional BSON value into display text.
///
/// Strings pass through unchanged, `ObjectId`s become their hex form and BSON
/// datetimes become RFC 3339 text. `null` and `undefined` yield `None`. Any
/// other scalar uses its display form.
pub fn bson_text(value: Option<&Bson>) -> Option<String> {
    match value? {
        Bson::Null | Bson::Undefined => None,
        Bson::String(s) => Some(s.clone()),
        Bson::ObjectId(oid) => Some(oid.to_hex()),
        Bson::DateTime(dt) => dt.try_to_rfc3339_string().ok(),
        Bson::Int32(n) => Some(n.to_string()),
        Bson::Int64(n) => Some(n.to_string()),
        Bson::Double(n) => Some(n.to_string()),
        Bson::Boolean(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}
