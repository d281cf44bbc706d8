//! Field normalization for raw article documents.
//!
//! Turns [`RawArticle`] documents into [`Article`] records with canonical
//! field names and two derived values:
//!
//! - `parsed_date`: the release-date string read permissively. Anything that
//!   cannot be understood becomes `None`; it never aborts the render.
//! - `domain`: the network location of the article URL, or `"Unknown"`.
//!
//! # Accepted Date Forms
//!
//! | Example | Notes |
//! |---------|-------|
//! | `2024-01-15T10:30:00+07:00` | RFC 3339, wall-clock time kept |
//! | `Mon, 15 Jan 2024 10:30:00 +0700` | RFC 2822 |
//! | `2024-01-15 10:30:00.123` | ISO, `T` or space, optional seconds/fraction |
//! | `2024-01-15`, `2024/01/15`, `01/15/2024` | Date only, midnight |
//! | `15/01/2024`, `15-01-2024 10:30` | Day first, tried after month first |
//! | `15 January 2024`, `Jan 15, 2024` | English month names |
//! | `Senin, 15 Januari 2024 10:30 WIB` | Indonesian weekday, month and zone |

use crate::models::{Article, RawArticle, bson_text};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::{debug, instrument};
use url::{Position, Url};

/// Domain sentinel for articles without a usable URL.
pub const UNKNOWN_DOMAIN: &str = "Unknown";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d %B %Y %H:%M:%S",
    "%d %B %Y %H:%M",
    "%B %d, %Y %H:%M",
];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
];

static WEEKDAY_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(senin|selasa|rabu|kamis|jumat|jum'at|sabtu|minggu|ahad|monday|tuesday|wednesday|thursday|friday|saturday|sunday|mon|tue|wed|thu|fri|sat|sun),?\s+",
    )
    .unwrap()
});

static ZONE_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+(wib|wita|wit)$").unwrap());

static CLOCK_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+(pukul|jam)\s+").unwrap());

static LETTERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{L}+").unwrap());

/// Map an Indonesian month name or abbreviation to its English form.
fn english_month(word: &str) -> Option<&'static str> {
    let month = match word.to_lowercase().as_str() {
        "januari" => "January",
        "februari" | "pebruari" => "February",
        "maret" => "March",
        "mei" => "May",
        "juni" => "June",
        "juli" => "July",
        "agustus" | "agu" | "agt" => "August",
        "oktober" | "okt" => "October",
        "desember" | "des" => "December",
        _ => return None,
    };
    Some(month)
}

/// Strip Indonesian decorations so the chrono formats can match.
fn clean_date_text(text: &str) -> String {
    let text = WEEKDAY_PREFIX.replace(text, "");
    let text = ZONE_SUFFIX.replace(&text, "");
    let text = CLOCK_WORD.replace_all(&text, " ");
    LETTERS
        .replace_all(&text, |caps: &Captures| {
            english_month(&caps[0])
                .map(str::to_string)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .trim()
        .trim_end_matches(',')
        .to_string()
}

/// Parse a release-date string permissively.
///
/// Returns `None` for empty input and for anything no accepted form matches.
/// Timestamps with an offset keep their local wall-clock time, so an article
/// released at `2024-01-31T23:30:00+07:00` counts towards January.
pub fn parse_release_date(raw: &str) -> Option<NaiveDateTime> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.naive_local());
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Some(dt.naive_local());
        }
    }

    let cleaned = clean_date_text(text);
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&cleaned, format) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&cleaned, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Extract the network-location component of an article URL.
///
/// Returns the userinfo, host and explicit port of an absolute URL, or
/// [`UNKNOWN_DOMAIN`] when the URL is missing, cannot be parsed, or has no
/// host (`mailto:`, relative paths).
///
/// # Examples
///
/// ```ignore
/// assert_eq!(extract_domain(Some("https://a.com/x")), "a.com");
/// assert_eq!(extract_domain(None), "Unknown");
/// ```
pub fn extract_domain(url: Option<&str>) -> String {
    url.and_then(|raw| Url::parse(raw.trim()).ok())
        .filter(|parsed| parsed.host_str().is_some_and(|host| !host.is_empty()))
        .map(|parsed| parsed[Position::BeforeUsername..Position::AfterPort].to_string())
        .unwrap_or_else(|| UNKNOWN_DOMAIN.to_string())
}

/// Normalize a single raw document.
pub fn normalize_article(raw: RawArticle) -> Article {
    let release_date = bson_text(raw.release_date.as_ref());
    let url = bson_text(raw.url.as_ref());
    let parsed_date = release_date.as_deref().and_then(parse_release_date);
    let domain = extract_domain(url.as_deref());

    Article {
        id: bson_text(raw.id.as_ref()),
        title: bson_text(raw.title.as_ref()),
        body: bson_text(raw.body.as_ref()),
        release_date,
        url,
        parsed_date,
        domain,
    }
}

/// Normalize a whole dataset, one output record per input record.
#[instrument(level = "info", skip_all, fields(count = raw.len()))]
pub fn normalize_articles(raw: Vec<RawArticle>) -> Vec<Article> {
    let articles: Vec<Article> = raw.into_iter().map(normalize_article).collect();

    let undated = articles.iter().filter(|a| a.parsed_date.is_none()).count();
    let unknown_domain = articles
        .iter()
        .filter(|a| a.domain == UNKNOWN_DOMAIN)
        .count();
    debug!(
        total = articles.len(),
        undated, unknown_domain, "Normalized articles"
    );
    articles
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate, Timelike};
    use mongodb::bson::Bson;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_release_date("2024-01-15"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_release_date("  2024/01/15 "), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_release_date("01/15/2024"), Some(ymd(2024, 1, 15)));
    }

    #[test]
    fn test_parse_day_first_dates() {
        assert_eq!(parse_release_date("15/01/2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_release_date("15-01-2024"), Some(ymd(2024, 1, 15)));
        let dt = parse_release_date("31/12/2023 08:45").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day(), dt.hour()), (2023, 12, 31, 8));
        let dt = parse_release_date("20-02-2024 10:30:15").unwrap();
        assert_eq!((dt.month(), dt.day(), dt.second()), (2, 20, 15));
    }

    #[test]
    fn test_parse_ambiguous_slash_date_is_month_first() {
        assert_eq!(parse_release_date("02/03/2024"), Some(ymd(2024, 2, 3)));
    }

    #[test]
    fn test_parse_iso_datetime_variants() {
        let dt = parse_release_date("2024-01-15 10:30:00").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (10, 30));
        let dt = parse_release_date("2024-01-15T10:30:00.250").unwrap();
        assert_eq!(dt.day(), 15);
        let dt = parse_release_date("2024-01-15 10:30").unwrap();
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_parse_keeps_wall_clock_with_offset() {
        let dt = parse_release_date("2024-01-31T23:30:00+07:00").unwrap();
        assert_eq!((dt.month(), dt.day(), dt.hour()), (1, 31, 23));
        let dt = parse_release_date("Wed, 31 Jan 2024 23:30:00 +0700").unwrap();
        assert_eq!(dt.month(), 1);
    }

    #[test]
    fn test_parse_english_month_names() {
        assert_eq!(parse_release_date("15 January 2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_release_date("January 15, 2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_release_date("Jan 15, 2024"), Some(ymd(2024, 1, 15)));
    }

    #[test]
    fn test_parse_indonesian_dates() {
        assert_eq!(parse_release_date("15 Januari 2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_release_date("3 Mei 2023"), Some(ymd(2023, 5, 3)));
        assert_eq!(parse_release_date("17 Agustus 2023"), Some(ymd(2023, 8, 17)));
        let dt = parse_release_date("Senin, 15 Januari 2024 10:30 WIB").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.hour()), (2024, 1, 10));
        let dt = parse_release_date("Kamis, 7 Desember 2023 pukul 08:15").unwrap();
        assert_eq!((dt.month(), dt.minute()), (12, 15));
    }

    #[test]
    fn test_parse_failures_are_none() {
        assert_eq!(parse_release_date(""), None);
        assert_eq!(parse_release_date("   "), None);
        assert_eq!(parse_release_date("kemarin"), None);
        assert_eq!(parse_release_date("2024-13-45"), None);
        assert_eq!(parse_release_date("15 Brumaire 2024"), None);
    }

    #[test]
    fn test_extract_domain_well_formed() {
        assert_eq!(extract_domain(Some("https://a.com/x")), "a.com");
        assert_eq!(
            extract_domain(Some("https://www.alodokter.com/stroke")),
            "www.alodokter.com"
        );
        assert_eq!(extract_domain(Some("http://a.com:8080/x?y=1")), "a.com:8080");
    }

    #[test]
    fn test_extract_domain_unknown() {
        assert_eq!(extract_domain(None), UNKNOWN_DOMAIN);
        assert_eq!(extract_domain(Some("")), UNKNOWN_DOMAIN);
        assert_eq!(extract_domain(Some("a.com/x")), UNKNOWN_DOMAIN);
        assert_eq!(extract_domain(Some("mailto:redaksi@a.com")), UNKNOWN_DOMAIN);
        assert_eq!(extract_domain(Some("not a url")), UNKNOWN_DOMAIN);
    }

    #[test]
    fn test_normalize_article_full_record() {
        let raw = RawArticle {
            id: Some(Bson::String("abc".into())),
            title: Some(Bson::String("Tanda Stroke Ringan".into())),
            body: Some(Bson::String("...".into())),
            release_date: Some(Bson::String("2024-01-15".into())),
            url: Some(Bson::String("https://a.com/x".into())),
        };
        let article = normalize_article(raw);
        assert_eq!(article.id.as_deref(), Some("abc"));
        assert_eq!(article.release_date.as_deref(), Some("2024-01-15"));
        assert_eq!(article.parsed_date, Some(ymd(2024, 1, 15)));
        assert_eq!(article.domain, "a.com");
    }

    #[test]
    fn test_normalize_article_degrades_missing_fields() {
        let raw = RawArticle {
            title: Some(Bson::String("Resep Sehat".into())),
            body: Some(Bson::String("tidak ada stroke di sini".into())),
            release_date: Some(Bson::Null),
            ..RawArticle::default()
        };
        let article = normalize_article(raw);
        assert_eq!(article.parsed_date, None);
        assert_eq!(article.release_date, None);
        assert_eq!(article.domain, UNKNOWN_DOMAIN);
    }

    #[test]
    fn test_normalize_articles_never_drops_records() {
        let raw = vec![
            RawArticle::default(),
            RawArticle {
                release_date: Some(Bson::String("garbage".into())),
                url: Some(Bson::Int32(3)),
                ..RawArticle::default()
            },
            RawArticle::default(),
        ];
        let articles = normalize_articles(raw);
        assert_eq!(articles.len(), 3);
        assert!(articles.iter().all(|a| a.parsed_date.is_none()));
        assert!(articles.iter().all(|a| a.domain == UNKNOWN_DOMAIN));
    }
}
