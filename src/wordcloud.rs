//! Word-frequency visualization of article titles.
//!
//! Two stages:
//!
//! 1. [`word_frequencies`] counts words in the normalized title corpus,
//!    filtering the stopword set a second time, folding simple plurals and
//!    merging strongly associated word pairs into two-word entries.
//! 2. [`layout`] places the most frequent words on a fixed canvas, largest
//!    first, walking an Archimedean spiral out from the centre until each
//!    word's bounding box fits without overlapping earlier ones.
//!
//! The layout is fully deterministic: the same corpus always produces the
//! same picture. Rendering to SVG lives in [`crate::outputs::svg`].

use crate::text::is_stopword;
use itertools::Itertools;
use std::cmp::Reverse;
use std::collections::HashMap;

pub const CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 400;
pub const BACKGROUND: &str = "#ffffff";
pub const MAX_WORDS: usize = 100;

/// Ten evenly spaced stops of the viridis colormap, dark to light.
pub const VIRIDIS: [&str; 10] = [
    "#440154", "#482878", "#3e4989", "#31688e", "#26828e", "#1f9e89", "#35b779", "#6ece58",
    "#b5de2b", "#fde725",
];

const MAX_FONT_SIZE: f64 = 120.0;
const MIN_FONT_SIZE: f64 = 10.0;
const RELATIVE_SCALING: f64 = 0.5;
const SHRINK_FACTOR: f64 = 0.85;
/// Average glyph advance as a fraction of the font size.
const CHAR_WIDTH_RATIO: f64 = 0.6;
const LINE_HEIGHT_RATIO: f64 = 1.1;
const PADDING: f64 = 2.0;
const SPIRAL_ANGLE_STEP: f64 = 0.2;
const SPIRAL_GROWTH: f64 = 1.5;
/// Minimum log-likelihood score for a word pair to count as one entry.
pub const COLLOCATION_THRESHOLD: f64 = 30.0;

/// A word and how often it occurs in the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
}

/// A word positioned on the canvas.
///
/// `x`, `y`, `width` and `height` describe the bounding box in canvas
/// pixels. Vertical words read bottom to top inside their box.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub font_size: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub vertical: bool,
    pub color: &'static str,
}

impl PlacedWord {
    fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width + PADDING
            && other.x < self.x + self.width + PADDING
            && self.y < other.y + other.height + PADDING
            && other.y < self.y + self.height + PADDING
    }
}

/// A laid-out word cloud ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct WordCloud {
    pub width: u32,
    pub height: u32,
    pub background: &'static str,
    pub words: Vec<PlacedWord>,
}

#[derive(Debug, Clone, Copy)]
struct Rect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// Fold a word ending in a single `s` into its singular when the singular
/// also occurs. Returns the folded counts and the plural-to-singular map.
fn fold_plurals(mut counts: HashMap<String, usize>) -> (HashMap<String, usize>, HashMap<String, String>) {
    let plurals: Vec<String> = counts
        .keys()
        .filter(|word| word.ends_with('s') && !word.ends_with("ss") && word.chars().count() > 3)
        .filter(|word| counts.contains_key(&word[..word.len() - 1]))
        .cloned()
        .collect();

    let mut singular_of = HashMap::with_capacity(plurals.len());
    for plural in plurals {
        let singular = plural[..plural.len() - 1].to_string();
        if let Some(count) = counts.remove(&plural) {
            *counts.entry(singular.clone()).or_default() += count;
        }
        singular_of.insert(plural, singular);
    }
    (counts, singular_of)
}

fn log_likelihood(k: f64, n: f64, x: f64) -> f64 {
    x.max(1e-10).ln() * k + (1.0 - x).max(1e-10).ln() * (n - k)
}

/// Dunning log-likelihood score of a bigram against independent words.
///
/// `first` and `second` are the unigram counts, `total` the number of
/// tokens. Returns 0 when every token is the first word.
fn collocation_score(bigram: usize, first: usize, second: usize, total: usize) -> f64 {
    if first >= total {
        return 0.0;
    }
    let (c12, c1, c2, n) = (bigram as f64, first as f64, second as f64, total as f64);
    let p = c2 / n;
    let p1 = c12 / c1;
    let p2 = (c2 - c12) / (n - c1);
    let score = log_likelihood(c12, c1, p) + log_likelihood(c2 - c12, n - c1, p)
        - log_likelihood(c12, c1, p1)
        - log_likelihood(c2 - c12, n - c1, p2);
    -2.0 * score
}

/// Count words and collocations in a normalized corpus.
///
/// Stopwords are removed again and simple plurals folded. Adjacent word
/// pairs scoring above [`COLLOCATION_THRESHOLD`] become a single
/// `"first second"` entry and their count is taken off both words; words
/// left with nothing are dropped. The result is ranked by count (highest
/// first, then alphabetically) and capped at `max_words`.
pub fn word_frequencies(corpus: &str, max_words: usize) -> Vec<WordFrequency> {
    let tokens: Vec<String> = corpus
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|word| !is_stopword(word))
        .collect();

    let (unigrams, singular_of) = fold_plurals(tokens.iter().cloned().counts());
    let standard = |word: &String| singular_of.get(word).unwrap_or(word).clone();
    let bigrams = tokens
        .iter()
        .tuple_windows()
        .map(|(first, second)| (standard(first), standard(second)))
        .counts();

    let mut counts: HashMap<String, i64> = unigrams
        .iter()
        .map(|(word, &count)| (word.clone(), count as i64))
        .collect();
    for ((first, second), count) in bigrams {
        let first_count = unigrams.get(&first).copied().unwrap_or(0);
        let second_count = unigrams.get(&second).copied().unwrap_or(0);
        if collocation_score(count, first_count, second_count, tokens.len()) > COLLOCATION_THRESHOLD {
            *counts.entry(first.clone()).or_default() -= count as i64;
            *counts.entry(second.clone()).or_default() -= count as i64;
            counts.insert(format!("{first} {second}"), count as i64);
        }
    }

    counts
        .into_iter()
        .filter_map(|(word, count)| usize::try_from(count).ok().filter(|&c| c > 0).map(|c| (word, c)))
        .sorted_unstable_by(|(a_word, a_count), (b_word, b_count)| {
            (Reverse(a_count), a_word).cmp(&(Reverse(b_count), b_word))
        })
        .take(max_words)
        .map(|(word, count)| WordFrequency { word, count })
        .collect()
}

fn text_box(word: &str, font_size: f64, vertical: bool) -> (f64, f64) {
    let length = word.chars().count() as f64 * font_size * CHAR_WIDTH_RATIO;
    let thickness = font_size * LINE_HEIGHT_RATIO;
    if vertical {
        (thickness, length)
    } else {
        (length, thickness)
    }
}

/// Find a free spot for a box of the given size, spiralling out from the centre.
fn find_position(placed: &[PlacedWord], width: f64, height: f64) -> Option<Rect> {
    let canvas_w = f64::from(CANVAS_WIDTH);
    let canvas_h = f64::from(CANVAS_HEIGHT);
    if width > canvas_w || height > canvas_h {
        return None;
    }

    let (cx, cy) = (canvas_w / 2.0, canvas_h / 2.0);
    let aspect = canvas_w / canvas_h;
    let max_radius = canvas_w.hypot(canvas_h) / 2.0;

    let mut angle: f64 = 0.0;
    loop {
        let radius = SPIRAL_GROWTH * angle;
        if radius > max_radius {
            return None;
        }
        let x = cx + radius * angle.cos() * aspect.sqrt() - width / 2.0;
        let y = cy + radius * angle.sin() / aspect.sqrt() - height / 2.0;
        let candidate = Rect {
            x,
            y,
            width,
            height,
        };

        let inside = x >= 0.0 && y >= 0.0 && x + width <= canvas_w && y + height <= canvas_h;
        if inside && !placed.iter().any(|word| word.overlaps(&candidate)) {
            return Some(candidate);
        }
        angle += SPIRAL_ANGLE_STEP;
    }
}

/// Lay out ranked words on the canvas.
///
/// The first word starts at the maximum font size; each following word is
/// sized relative to the previous one by frequency ratio (relative scaling
/// 0.5). Words that do not fit are shrunk until the minimum size, and
/// placement stops at the first word that cannot fit at all.
pub fn layout(frequencies: &[WordFrequency]) -> WordCloud {
    let mut placed: Vec<PlacedWord> = Vec::with_capacity(frequencies.len());
    let mut font_size = MAX_FONT_SIZE;
    let mut last_count: Option<usize> = None;

    for (rank, entry) in frequencies.iter().enumerate() {
        if let Some(previous) = last_count {
            let ratio = entry.count as f64 / previous as f64;
            font_size = ((RELATIVE_SCALING * ratio + (1.0 - RELATIVE_SCALING)) * font_size).round();
        }
        let prefer_vertical = rank % 10 == 9;
        let color = VIRIDIS[rank * VIRIDIS.len() / frequencies.len()];

        let mut size = font_size.max(MIN_FONT_SIZE);
        let spot = loop {
            let found = [prefer_vertical, !prefer_vertical]
                .into_iter()
                .find_map(|vertical| {
                    let (w, h) = text_box(&entry.word, size, vertical);
                    find_position(&placed, w, h).map(|rect| (rect, vertical))
                });
            if found.is_some() || size <= MIN_FONT_SIZE {
                break found;
            }
            size = (size * SHRINK_FACTOR).max(MIN_FONT_SIZE);
        };

        let Some((rect, vertical)) = spot else {
            tracing::debug!(word = %entry.word, placed = placed.len(), "Word cloud canvas full");
            break;
        };
        placed.push(PlacedWord {
            word: entry.word.clone(),
            font_size: size,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            vertical,
            color,
        });
        font_size = size;
        last_count = Some(entry.count);
    }

    WordCloud {
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
        background: BACKGROUND,
        words: placed,
    }
}

/// Build a word cloud from a normalized corpus.
///
/// Returns `None` when no word survives filtering.
pub fn build_word_cloud(corpus: &str) -> Option<WordCloud> {
    let frequencies = word_frequencies(corpus, MAX_WORDS);
    if frequencies.is_empty() {
        return None;
    }
    Some(layout(&frequencies))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freq(word: &str, count: usize) -> WordFrequency {
        WordFrequency {
            word: word.to_string(),
            count,
        }
    }

    #[test]
    fn test_word_frequencies_ranked() {
        let result = word_frequencies("stroke gejala stroke tanda stroke gejala", 10);
        assert_eq!(
            result,
            vec![freq("stroke", 3), freq("gejala", 2), freq("tanda", 1)]
        );
    }

    #[test]
    fn test_word_frequencies_ties_alphabetical() {
        let result = word_frequencies("zebra apel mangga", 10);
        let words: Vec<&str> = result.iter().map(|f| f.word.as_str()).collect();
        assert_eq!(words, vec!["apel", "mangga", "zebra"]);
    }

    #[test]
    fn test_word_frequencies_second_stopword_pass() {
        let result = word_frequencies("stroke YANG alodokter stroke", 10);
        assert_eq!(result, vec![freq("stroke", 2)]);
    }

    #[test]
    fn test_word_frequencies_fold_plurals() {
        let result = word_frequencies("symptom symptoms symptoms stress", 10);
        assert_eq!(result, vec![freq("symptom", 3), freq("stress", 1)]);
    }

    #[test]
    fn test_word_frequencies_merges_collocations() {
        let corpus = (0..20).map(|i| format!("gejala stroke kata{i}")).join(" ");
        let result = word_frequencies(&corpus, MAX_WORDS);
        assert_eq!(result[0], freq("gejala stroke", 20));
        assert!(result.iter().all(|f| f.word != "gejala" && f.word != "stroke"));
        assert_eq!(result.len(), 21);
    }

    #[test]
    fn test_collocation_score_weak_pairs_stay_apart() {
        assert!(collocation_score(1, 20, 1, 60) < COLLOCATION_THRESHOLD);
        assert!(collocation_score(20, 20, 20, 60) > COLLOCATION_THRESHOLD);
        assert_eq!(collocation_score(1, 2, 2, 2), 0.0);
    }

    #[test]
    fn test_word_frequencies_keeps_plural_without_singular() {
        let result = word_frequencies("diabetes diabetes", 10);
        assert_eq!(result, vec![freq("diabetes", 2)]);
    }

    #[test]
    fn test_word_frequencies_capped() {
        let corpus = (0..150).map(|i| format!("kata{i}")).join(" ");
        assert_eq!(word_frequencies(&corpus, MAX_WORDS).len(), MAX_WORDS);
    }

    #[test]
    fn test_layout_fits_canvas_without_overlap() {
        let frequencies: Vec<WordFrequency> = (0..40)
            .map(|i| freq(&format!("kata{i}"), 50 - i))
            .collect();
        let cloud = layout(&frequencies);
        assert!(!cloud.words.is_empty());

        for (i, a) in cloud.words.iter().enumerate() {
            assert!(a.x >= 0.0 && a.y >= 0.0);
            assert!(a.x + a.width <= f64::from(cloud.width));
            assert!(a.y + a.height <= f64::from(cloud.height));
            for b in &cloud.words[i + 1..] {
                let rect = Rect {
                    x: b.x,
                    y: b.y,
                    width: b.width,
                    height: b.height,
                };
                assert!(!a.overlaps(&rect), "{} overlaps {}", a.word, b.word);
            }
        }
    }

    #[test]
    fn test_layout_sizes_follow_frequency() {
        let cloud = layout(&[freq("stroke", 10), freq("gejala", 5), freq("tanda", 1)]);
        let sizes: Vec<f64> = cloud.words.iter().map(|w| w.font_size).collect();
        assert_eq!(sizes.len(), 3);
        assert!(sizes[0] > sizes[1] && sizes[1] > sizes[2]);
        assert_eq!(cloud.words[0].color, VIRIDIS[0]);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let frequencies = word_frequencies("stroke gejala tanda ringan stroke gejala stroke", 100);
        assert_eq!(layout(&frequencies), layout(&frequencies));
    }

    #[test]
    fn test_build_word_cloud_empty_corpus() {
        assert!(build_word_cloud("").is_none());
        assert!(build_word_cloud("yang dan").is_none());
    }

    #[test]
    fn test_build_word_cloud_canvas_settings() {
        let cloud = build_word_cloud("stroke").unwrap();
        assert_eq!((cloud.width, cloud.height), (800, 400));
        assert_eq!(cloud.background, "#ffffff");
        assert_eq!(cloud.words[0].word, "stroke");
    }
}
