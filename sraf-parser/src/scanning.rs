//! Lexicon scanning
//!
//! Scanning runs in three steps over a borrowed, read-only lexicon:
//!
//! 1. Prepare: drop the month name "May" (see [`MonthFilter`]) and uppercase the text.
//! 2. Token pass: every word token longer than one character, not purely numeric and
//!    present in the lexicon adds to the word count, the length and syllable totals,
//!    the vocabulary set and each category its entry is flagged with.
//! 3. Character pass: count ASCII letters, ASCII digits and number tokens over the
//!    prepared text.
//!
//! The counters are then frozen into a [`DocumentStatistics`] record. Each call owns
//! its counters, so a [`Scanner`] can be shared freely across threads.

pub mod month;
pub mod numbers;
pub mod tokens;

pub use month::MonthFilter;

use crate::document::Document;
use crate::error::ScanError;
use crate::lexicon::Lexicon;
use crate::statistics::{DocumentStatistics, Tally};
use rayon::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy)]
pub struct Scanner<'a> {
    lexicon: &'a Lexicon,
    month_filter: MonthFilter,
}

impl<'a> Scanner<'a> {
    /// Create a scanner over `lexicon`
    ///
    /// Fails with [`ScanError::MissingLexicon`] if the lexicon has no entries.
    pub fn new(lexicon: &'a Lexicon) -> Result<Self, ScanError> {
        if lexicon.is_empty() {
            return Err(ScanError::MissingLexicon);
        }
        Ok(Scanner {
            lexicon,
            month_filter: MonthFilter::default(),
        })
    }

    pub fn with_month_filter(mut self, month_filter: MonthFilter) -> Self {
        self.month_filter = month_filter;
        self
    }

    pub fn lexicon(&self) -> &'a Lexicon {
        self.lexicon
    }

    pub fn month_filter(&self) -> MonthFilter {
        self.month_filter
    }

    /// Month removal followed by uppercasing
    pub fn prepare(&self, text: &str) -> String {
        self.month_filter.apply(text).to_uppercase()
    }

    /// Collect the raw counters for `text`
    pub fn tally(&self, text: &str) -> Tally {
        let prepared = self.prepare(text);
        let mut tally = Tally::default();
        let mut vocabulary = HashSet::new();

        for word in tokens::words(&prepared) {
            if !tokens::is_candidate(word) {
                continue;
            }
            let Some(entry) = self.lexicon.get(word) else {
                continue;
            };

            tally.word_count += 1;
            tally.total_word_length += word.chars().count() as u64;
            vocabulary.insert(word);
            for category in entry.categories.iter() {
                tally.category_counts[category.index()] += 1;
            }
            tally.total_syllables += u64::from(entry.syllables);
        }

        tally.vocabulary_size = vocabulary.len() as u64;
        tally.alphabetic = numbers::count_alphabetic(&prepared);
        tally.digits = numbers::count_digits(&prepared);
        tally.numbers = numbers::count_numbers(&prepared);
        tally
    }

    pub fn scan(&self, document: &Document) -> DocumentStatistics {
        let tally = self.tally(&document.text);
        DocumentStatistics::from_tally(document.id.as_str(), document.size, &tally)
    }

    /// Scan documents in parallel, keeping input order
    pub fn scan_batch(&self, documents: &[Document]) -> Vec<DocumentStatistics> {
        documents
            .par_iter()
            .map(|document| self.scan(document))
            .collect()
    }
}

/// Scan a single document with the default month filter
pub fn scan(document: &Document, lexicon: &Lexicon) -> Result<DocumentStatistics, ScanError> {
    Ok(Scanner::new(lexicon)?.scan(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Category;

    fn lexicon() -> Lexicon {
        Lexicon::builder()
            .word("GOOD", &[Category::Positive], 1)
            .unwrap()
            .word("BAD", &[Category::Negative], 1)
            .unwrap()
            .word("MAY", &[Category::Uncertainty, Category::WeakModal], 1)
            .unwrap()
            .word("LITIGATION", &[Category::Litigious], 4)
            .unwrap()
            .word("REVENUE", &[], 3)
            .unwrap()
            .build()
    }

    #[test]
    fn test_empty_lexicon_fails_fast() {
        let empty = Lexicon::default();
        assert_eq!(Scanner::new(&empty).unwrap_err(), ScanError::MissingLexicon);
        assert_eq!(
            scan(&Document::new("d", "GOOD"), &empty).unwrap_err(),
            ScanError::MissingLexicon
        );
    }

    #[test]
    fn test_prepare_strips_month_and_uppercases() {
        let lexicon = lexicon();
        let scanner = Scanner::new(&lexicon).unwrap();
        assert_eq!(scanner.prepare("On May 5 revenue rose"), "ON   5 REVENUE ROSE");
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let lexicon = lexicon();
        let tally = Scanner::new(&lexicon).unwrap().tally("good Good GOOD");
        assert_eq!(tally.word_count, 3);
        assert_eq!(tally.vocabulary_size, 1);
    }

    #[test]
    fn test_tally_counts_lengths_and_syllables() {
        let lexicon = lexicon();
        let tally = Scanner::new(&lexicon)
            .unwrap()
            .tally("Pending litigation hurt revenue.");
        assert_eq!(tally.word_count, 2);
        assert_eq!(tally.total_word_length, 10 + 7);
        assert_eq!(tally.total_syllables, 4 + 3);
        assert_eq!(tally.category_count(Category::Litigious), 1);
        assert_eq!(tally.category_counts.iter().sum::<u64>(), 1);
    }

    #[test]
    fn test_flagless_words_count_without_categories() {
        let lexicon = lexicon();
        let stats = scan(&Document::new("d", "revenue revenue"), &lexicon).unwrap();
        assert_eq!(stats.word_count, 2);
        for category in Category::ALL {
            assert_eq!(stats.percentage(category), 0.0);
        }
    }

    #[test]
    fn test_month_filter_controls_modal_may() {
        let lexicon = lexicon();
        let text = "Results may vary. Filed May 3.";

        let default = Scanner::new(&lexicon).unwrap().tally(text);
        assert_eq!(default.word_count, 0);

        let exact = Scanner::new(&lexicon)
            .unwrap()
            .with_month_filter(MonthFilter::ExactCase)
            .tally(text);
        assert_eq!(exact.word_count, 1);
        assert_eq!(exact.category_count(Category::Uncertainty), 1);
        assert_eq!(exact.category_count(Category::WeakModal), 1);

        let disabled = Scanner::new(&lexicon)
            .unwrap()
            .with_month_filter(MonthFilter::Disabled)
            .tally(text);
        assert_eq!(disabled.word_count, 2);
    }

    #[test]
    fn test_single_letters_and_numbers_are_skipped() {
        let lexicon = Lexicon::builder()
            .word("A", &[Category::Positive], 1)
            .unwrap()
            .word("10", &[Category::Negative], 1)
            .unwrap()
            .build();
        let tally = Scanner::new(&lexicon).unwrap().tally("a 10 A 10");
        assert_eq!(tally.word_count, 0);
        assert_eq!(tally.digits, 4);
        assert_eq!(tally.numbers, 2);
    }

    #[test]
    fn test_batch_keeps_input_order() {
        let lexicon = lexicon();
        let docs: Vec<_> = (0..32)
            .map(|i| Document::new(format!("doc-{i}"), "good ".repeat(i)))
            .collect();
        let results = Scanner::new(&lexicon).unwrap().scan_batch(&docs);

        assert_eq!(results.len(), 32);
        for (i, stats) in results.iter().enumerate() {
            assert_eq!(stats.source, format!("doc-{i}"));
            assert_eq!(stats.word_count, i as u64);
        }
        assert!(results[0].positive.is_nan());
        assert_eq!(results[5].positive, 100.0);
    }

    #[test]
    fn test_accessors_report_configuration() {
        let lexicon = lexicon();
        let scanner = Scanner::new(&lexicon)
            .unwrap()
            .with_month_filter(MonthFilter::Disabled);
        assert_eq!(scanner.lexicon().len(), 5);
        assert_eq!(scanner.month_filter(), MonthFilter::Disabled);
    }
}
