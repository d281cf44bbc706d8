//! Title normalization for the word cloud.
//!
//! Each title goes through the same fixed steps, in order:
//!
//! 1. Lowercase
//! 2. Remove digits
//! 3. Remove ASCII punctuation
//! 4. Split on whitespace
//! 5. Drop stopwords and tokens shorter than three characters
//! 6. Rejoin with single spaces
//!
//! The output of [`normalize_title`] is a fixed point: feeding it back in
//! returns the same string.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Tokens shorter than this are dropped.
pub const MIN_TOKEN_CHARS: usize = 3;

/// Indonesian noise words plus site names and filler that crowd the cloud.
///
/// Matched against lowercased tokens. Multi-word entries never match a
/// single token and are kept for parity with the deployed list.
pub static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "yang", "dan", "di", "ke", "dari", "untuk", "dengan", "pada", "adalah", "atau", "itu",
        "ini", "karena", "jika", "sebagai", "oleh", "agar", "dalam", "bisa", "tidak", "lebih",
        "akan", "sudah", "belum", "maupun", "bahwa", "ada", "namun", "juga", "menjadi", "banyak",
        "setelah", "hingga", "dapat", "saja", "jadi", "lagi", "nya", "hal", "tersebut", "seperti",
        "group", "artikel", "wanita", "sering", "kamu", "fakta", "kesehatan", "ibu",
        "diperhatikan", "diketahui", "apa", "anda", "kami", "tak", "harus", "wajib", "segera",
        "jangan", "mudah", "detail", "feeds", "begini", "yuk", "bagaimana", "tentang", "yaitu",
        "klikdokter", "honestdocs", "liputancom", "alodokter", "lifepackid", "tempo.co", "rsud",
        "website", "universitas", "royal", "rumah", "sakit", "rs", "sri asih", "kasih",
        "axa mandiri", "bunda", "all", "geriatriid", "pukesmas", "terjadi", "abaikan", "sejak",
        "halaman grid",
    ]
    .into_iter()
    .collect()
});

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Whether a lowercased token is a stopword.
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// Normalize one title into space-separated content words.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_title("5 Tanda Stroke Ringan, Yuk Kenali!"), "tanda stroke ringan kenali");
/// ```
pub fn normalize_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    let without_digits = DIGITS.replace_all(&lowered, "");
    let without_punctuation: String = without_digits
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();

    without_punctuation
        .split_whitespace()
        .filter(|token| !is_stopword(token) && token.chars().count() >= MIN_TOKEN_CHARS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the word-cloud corpus from article titles.
///
/// Missing titles are skipped. Returns `None` when no title exists at all,
/// which the page reports instead of drawing a cloud.
pub fn title_corpus<'a, I>(titles: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let normalized: Vec<String> = titles.into_iter().flatten().map(normalize_title).collect();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_title_pipeline() {
        assert_eq!(
            normalize_title("5 Tanda Stroke Ringan, Yuk Kenali!"),
            "tanda stroke ringan kenali"
        );
    }

    #[test]
    fn test_normalize_title_strips_digits_inside_tokens() {
        assert_eq!(normalize_title("COVID19 dan Stroke"), "covid stroke");
    }

    #[test]
    fn test_normalize_title_drops_stopwords_and_short_tokens() {
        assert_eq!(normalize_title("Apa itu TIA di Rumah Sakit?"), "tia");
        assert_eq!(normalize_title("Ke RS yang ada di kota"), "kota");
    }

    #[test]
    fn test_normalize_title_punctuation_joins_words() {
        // Punctuation is removed before splitting, so it glues its neighbours.
        assert_eq!(normalize_title("Hidup-Sehat: Stroke"), "hidupsehat stroke");
        assert_eq!(normalize_title("pasca-stroke"), "pascastroke");
    }

    #[test]
    fn test_normalize_title_site_name_removed_after_joining() {
        assert_eq!(normalize_title("Alodokter - Gejala Stroke"), "gejala stroke");
    }

    #[test]
    fn test_normalize_title_counts_characters_not_bytes() {
        assert_eq!(normalize_title("é ée éée"), "éée");
    }

    #[test]
    fn test_normalize_title_is_idempotent() {
        let titles = [
            "Tanda Stroke Ringan",
            "10 Fakta Kesehatan: Stroke pada Usia Muda!!",
            "Kenali Gejala (FAST) Stroke » Segera ke RS",
            "",
            "a b c",
        ];
        for title in titles {
            let once = normalize_title(title);
            assert_eq!(normalize_title(&once), once, "title: {title}");
        }
    }

    #[test]
    fn test_title_corpus_skips_missing() {
        let corpus = title_corpus([Some("Tanda Stroke"), None, Some("Gejala Stroke")]).unwrap();
        assert_eq!(corpus, "tanda stroke gejala stroke");
    }

    #[test]
    fn test_title_corpus_none_without_titles() {
        assert_eq!(title_corpus([None::<&str>, None]), None);
        assert_eq!(title_corpus(std::iter::empty::<Option<&str>>()), None);
    }

    #[test]
    fn test_stopwords_frozen_contents() {
        assert!(is_stopword("yang"));
        assert!(is_stopword("alodokter"));
        assert!(!is_stopword("stroke"));
    }
}
