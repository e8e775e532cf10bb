//! Per-document statistics
//!
//! A scan first fills a [`Tally`] of raw counters, then freezes it into a
//! [`DocumentStatistics`] record whose field order is the report column order.
//! When no word was recognized every ratio is NaN, so one empty filing never stops
//! a batch.

use crate::lexicon::Category;
use serde::Serialize;

/// Report column names, in record order
pub const REPORT_FIELDS: [&str; 16] = [
    "file name",
    "file size",
    "number of words",
    Category::Negative.label(),
    Category::Positive.label(),
    Category::Uncertainty.label(),
    Category::Litigious.label(),
    Category::StrongModal.label(),
    Category::WeakModal.label(),
    Category::Constraining.label(),
    "# of alphabetic",
    "# of digits",
    "# of numbers",
    "avg # of syllables per word",
    "average word length",
    "vocabulary",
];

/// Raw counters collected by one scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub word_count: u64,
    pub category_counts: [u64; 7],
    pub total_syllables: u64,
    pub total_word_length: u64,
    pub vocabulary_size: u64,
    pub alphabetic: u64,
    pub digits: u64,
    pub numbers: u64,
}

impl Tally {
    pub fn category_count(&self, category: Category) -> u64 {
        self.category_counts[category.index()]
    }
}

/// The sixteen-field record written for each document
///
/// The `%` renames must match [`Category::label`]; `REPORT_FIELDS` is built from
/// the labels and the header test compares it with the serialized names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentStatistics {
    #[serde(rename = "file name")]
    pub source: String,
    #[serde(rename = "file size")]
    pub size: u64,
    #[serde(rename = "number of words")]
    pub word_count: u64,
    #[serde(rename = "% negative")]
    pub negative: f64,
    #[serde(rename = "% positive")]
    pub positive: f64,
    #[serde(rename = "% uncertainty")]
    pub uncertainty: f64,
    #[serde(rename = "% litigious")]
    pub litigious: f64,
    #[serde(rename = "% strong modal")]
    pub strong_modal: f64,
    #[serde(rename = "% weak modal")]
    pub weak_modal: f64,
    #[serde(rename = "% constraining")]
    pub constraining: f64,
    #[serde(rename = "# of alphabetic")]
    pub alphabetic: u64,
    #[serde(rename = "# of digits")]
    pub digits: u64,
    #[serde(rename = "# of numbers")]
    pub numbers: u64,
    #[serde(rename = "avg # of syllables per word")]
    pub avg_syllables: f64,
    #[serde(rename = "average word length")]
    pub avg_word_length: f64,
    #[serde(rename = "vocabulary")]
    pub vocabulary: u64,
}

impl DocumentStatistics {
    pub fn from_tally(source: impl Into<String>, size: u64, tally: &Tally) -> Self {
        let words = tally.word_count;
        let percent = |category: Category| ratio(tally.category_count(category), words) * 100.0;

        DocumentStatistics {
            source: source.into(),
            size,
            word_count: words,
            negative: percent(Category::Negative),
            positive: percent(Category::Positive),
            uncertainty: percent(Category::Uncertainty),
            litigious: percent(Category::Litigious),
            strong_modal: percent(Category::StrongModal),
            weak_modal: percent(Category::WeakModal),
            constraining: percent(Category::Constraining),
            alphabetic: tally.alphabetic,
            digits: tally.digits,
            numbers: tally.numbers,
            avg_syllables: ratio(tally.total_syllables, words),
            avg_word_length: ratio(tally.total_word_length, words),
            vocabulary: tally.vocabulary_size,
        }
    }

    pub fn percentage(&self, category: Category) -> f64 {
        match category {
            Category::Negative => self.negative,
            Category::Positive => self.positive,
            Category::Uncertainty => self.uncertainty,
            Category::Litigious => self.litigious,
            Category::StrongModal => self.strong_modal,
            Category::WeakModal => self.weak_modal,
            Category::Constraining => self.constraining,
        }
    }

    /// True when no lexicon word was found, i.e. every ratio is NaN
    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }
}

// NaN when there is nothing to divide by
fn ratio(numerator: u64, word_count: u64) -> f64 {
    if word_count == 0 {
        f64::NAN
    } else {
        numerator as f64 / word_count as f64
    }
}
