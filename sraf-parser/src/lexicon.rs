//! Sentiment lexicon
//!
//! A lexicon maps a normalized (uppercase) word to the categories it belongs to, its
//! syllable count and its sequence number in the source dictionary. Lexicons are
//! immutable once built: load one with [`Lexicon::from_path`] or assemble one with
//! [`LexiconBuilder`], then hand it to the scanner by reference.

pub mod loader;

use crate::error::LexiconError;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

/// The seven word lists of the Loughran-McDonald dictionary, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Negative,
    Positive,
    Uncertainty,
    Litigious,
    StrongModal,
    WeakModal,
    Constraining,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Negative,
        Category::Positive,
        Category::Uncertainty,
        Category::Litigious,
        Category::StrongModal,
        Category::WeakModal,
        Category::Constraining,
    ];

    /// Position of this category in [`Category::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column label used in reports
    pub const fn label(self) -> &'static str {
        match self {
            Category::Negative => "% negative",
            Category::Positive => "% positive",
            Category::Uncertainty => "% uncertainty",
            Category::Litigious => "% litigious",
            Category::StrongModal => "% strong modal",
            Category::WeakModal => "% weak modal",
            Category::Constraining => "% constraining",
        }
    }
}

/// Set of categories a word belongs to. Flags are independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Categories(u8);

impl Categories {
    pub fn empty() -> Self {
        Categories(0)
    }

    pub fn insert(&mut self, category: Category) {
        self.0 |= 1 << category.index();
    }

    pub fn with(mut self, category: Category) -> Self {
        self.insert(category);
        self
    }

    pub fn contains(self, category: Category) -> bool {
        self.0 & (1 << category.index()) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over the set categories in report order
    pub fn iter(self) -> impl Iterator<Item = Category> {
        Category::ALL
            .into_iter()
            .filter(move |category| self.contains(*category))
    }
}

impl FromIterator<Category> for Categories {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Categories::empty(), |set, category| set.with(category))
    }
}

impl Serialize for Categories {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(None)?;
        for category in self.iter() {
            seq.serialize_element(&category)?;
        }
        seq.end()
    }
}

/// One dictionary word
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexiconEntry {
    pub word: String,
    pub sequence_number: u64,
    pub categories: Categories,
    pub syllables: u32,
}

/// Immutable word lookup keyed by uppercase word
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, LexiconEntry>,
    by_sequence: BTreeMap<u64, String>,
}

impl Lexicon {
    pub fn builder() -> LexiconBuilder {
        LexiconBuilder::new()
    }

    /// Look up a word. Keys are uppercase; callers normalize before asking.
    pub fn get(&self, word: &str) -> Option<&LexiconEntry> {
        self.entries.get(word)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    /// Map a dictionary sequence number back to its word
    pub fn word_for_sequence(&self, sequence_number: u64) -> Option<&str> {
        self.by_sequence.get(&sequence_number).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in sequence-number order
    pub fn iter(&self) -> impl Iterator<Item = &LexiconEntry> {
        self.by_sequence
            .values()
            .filter_map(move |word| self.entries.get(word))
    }
}

/// Assembles a [`Lexicon`], enforcing unique words and sequence numbers
///
/// Entries added without an explicit sequence number are numbered in insertion
/// order, continuing after the largest number seen so far.
#[derive(Debug)]
pub struct LexiconBuilder {
    lexicon: Lexicon,
    // 1-based position of the next entry, reported as the "line" in errors
    position: u64,
    next_sequence: u64,
}

impl LexiconBuilder {
    pub fn new() -> Self {
        LexiconBuilder {
            lexicon: Lexicon::default(),
            position: 0,
            next_sequence: 1,
        }
    }

    /// Add a word with the next free sequence number
    pub fn word(
        self,
        word: &str,
        categories: &[Category],
        syllables: u32,
    ) -> Result<Self, LexiconError> {
        let sequence_number = self.next_sequence;
        let categories = categories.iter().copied().collect();
        self.entry(word, sequence_number, categories, syllables)
    }

    /// Add a fully specified entry
    pub fn entry(
        mut self,
        word: &str,
        sequence_number: u64,
        categories: Categories,
        syllables: u32,
    ) -> Result<Self, LexiconError> {
        self.position += 1;
        self.insert_at(self.position, word, sequence_number, categories, syllables)?;
        Ok(self)
    }

    pub(crate) fn insert_at(
        &mut self,
        line: u64,
        word: &str,
        sequence_number: u64,
        categories: Categories,
        syllables: u32,
    ) -> Result<(), LexiconError> {
        let word = normalize(word);
        if word.is_empty() {
            return Err(LexiconError::EmptyWord { line });
        }
        if self.lexicon.entries.contains_key(&word) {
            return Err(LexiconError::DuplicateWord { word, line });
        }
        if self.lexicon.by_sequence.contains_key(&sequence_number) {
            return Err(LexiconError::DuplicateSequence {
                sequence_number,
                line,
            });
        }

        self.next_sequence = self.next_sequence.max(sequence_number.saturating_add(1));
        self.lexicon.by_sequence.insert(sequence_number, word.clone());
        self.lexicon.entries.insert(
            word.clone(),
            LexiconEntry {
                word,
                sequence_number,
                categories,
                syllables,
            },
        );
        Ok(())
    }

    pub fn build(self) -> Lexicon {
        self.lexicon
    }
}

impl Default for LexiconBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a dictionary word to its lookup key
pub fn normalize(word: &str) -> String {
    word.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Lexicon {
        Lexicon::builder()
            .word("good", &[Category::Positive], 1)
            .unwrap()
            .word("Bad", &[Category::Negative], 1)
            .unwrap()
            .word("MAY", &[Category::Uncertainty, Category::WeakModal], 1)
            .unwrap()
            .build()
    }

    #[test]
    fn test_words_are_normalized_to_uppercase() {
        let lexicon = sample();
        assert!(lexicon.contains("GOOD"));
        assert!(lexicon.contains("BAD"));
        assert!(!lexicon.contains("good"));
    }

    #[test]
    fn test_sequence_numbers_follow_insertion_order() {
        let lexicon = sample();
        assert_eq!(lexicon.word_for_sequence(1), Some("GOOD"));
        assert_eq!(lexicon.word_for_sequence(3), Some("MAY"));
        assert_eq!(lexicon.word_for_sequence(4), None);

        let words: Vec<_> = lexicon.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["GOOD", "BAD", "MAY"]);
    }

    #[test]
    fn test_auto_numbering_continues_after_explicit_numbers() {
        let lexicon = Lexicon::builder()
            .entry("ABLE", 10, Categories::empty(), 2)
            .unwrap()
            .word("ABOUT", &[], 2)
            .unwrap()
            .build();
        assert_eq!(lexicon.get("ABOUT").unwrap().sequence_number, 11);
    }

    #[test]
    fn test_categories_are_independent_flags() {
        let entry = sample().get("MAY").cloned().unwrap();
        assert!(entry.categories.contains(Category::Uncertainty));
        assert!(entry.categories.contains(Category::WeakModal));
        assert!(!entry.categories.contains(Category::StrongModal));
        assert_eq!(
            entry.categories.iter().collect::<Vec<_>>(),
            vec![Category::Uncertainty, Category::WeakModal]
        );
    }

    #[test]
    fn test_duplicate_word_is_rejected() {
        let result = Lexicon::builder()
            .word("GOOD", &[Category::Positive], 1)
            .unwrap()
            .word("good", &[], 1);
        assert!(matches!(
            result,
            Err(LexiconError::DuplicateWord { ref word, line: 2 }) if word == "GOOD"
        ));
    }

    #[test]
    fn test_duplicate_sequence_is_rejected() {
        let result = Lexicon::builder()
            .entry("GOOD", 5, Categories::empty(), 1)
            .unwrap()
            .entry("BAD", 5, Categories::empty(), 1);
        assert!(matches!(
            result,
            Err(LexiconError::DuplicateSequence {
                sequence_number: 5,
                line: 2
            })
        ));
    }

    #[test]
    fn test_blank_word_is_rejected() {
        let result = Lexicon::builder().word("   ", &[], 0);
        assert!(matches!(result, Err(LexiconError::EmptyWord { line: 1 })));
    }

    #[test]
    fn test_category_labels_follow_report_order() {
        let labels: Vec<_> = Category::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels.first(), Some(&"% negative"));
        assert_eq!(labels.last(), Some(&"% constraining"));
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }
}
