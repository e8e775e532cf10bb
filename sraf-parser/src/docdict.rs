//! Document Dictionary decoding
//!
//! A Document Dictionary file holds one filing per line:
//!
//! ```text
//! <header columns>|<seq>:<count>,<seq>:<count>,...
//! ```
//!
//! The body lists, for every distinct dictionary word in the filing, the word's
//! Master Dictionary sequence number and how often it occurs. Decoding maps each
//! sequence number back to its word through [`Lexicon::word_for_sequence`]. The
//! header columns are kept verbatim; their meaning is up to the caller.

use crate::error::LexiconError;
use crate::lexicon::Lexicon;
use crate::statistics::{DocumentStatistics, Tally};
use std::collections::BTreeMap;
use std::io::{BufRead, Lines};

/// One decoded Document Dictionary line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocDictRecord {
    /// 1-based line number in the source file
    pub line: u64,
    /// Everything before the `|`, untouched
    pub header: String,
    /// Occurrences per uppercase word
    pub word_counts: BTreeMap<String, u64>,
    /// Sum of all counts in the body
    pub total_words: u64,
}

impl DocDictRecord {
    /// Decode one line against `lexicon`
    ///
    /// An empty body is valid and yields `total_words == 0`. A sequence number that
    /// appears twice has its counts added.
    pub fn parse(line: u64, text: &str, lexicon: &Lexicon) -> Result<Self, LexiconError> {
        let text = text.trim_end_matches(['\r', '\n']);
        let Some((header, body)) = text.split_once('|') else {
            return Err(malformed(line, "missing '|' between header and word counts"));
        };

        let mut word_counts = BTreeMap::new();
        let mut total_words = 0u64;
        for pair in body.split(',').map(str::trim).filter(|pair| !pair.is_empty()) {
            let (sequence, count) = pair
                .split_once(':')
                .ok_or_else(|| malformed(line, format!("expected '<seq>:<count>', found '{pair}'")))?;
            let sequence: u64 = sequence
                .trim()
                .parse()
                .map_err(|_| malformed(line, format!("invalid sequence number '{sequence}'")))?;
            let count: u64 = count
                .trim()
                .parse()
                .map_err(|_| malformed(line, format!("invalid count '{count}'")))?;
            let word = lexicon
                .word_for_sequence(sequence)
                .ok_or_else(|| malformed(line, format!("unknown sequence number {sequence}")))?;

            *word_counts.entry(word.to_string()).or_insert(0) += count;
            total_words += count;
        }

        Ok(DocDictRecord {
            line,
            header: header.to_string(),
            word_counts,
            total_words,
        })
    }

    /// Occurrences of an uppercase word, 0 when absent
    pub fn count(&self, word: &str) -> u64 {
        self.word_counts.get(word).copied().unwrap_or(0)
    }

    /// Rebuild the token-pass counters from the stored word counts
    ///
    /// Character counts are not recoverable from a Document Dictionary and stay 0.
    pub fn tally(&self, lexicon: &Lexicon) -> Tally {
        let mut tally = Tally {
            vocabulary_size: self.word_counts.len() as u64,
            ..Tally::default()
        };
        for (word, &count) in &self.word_counts {
            let Some(entry) = lexicon.get(word) else {
                continue;
            };
            tally.word_count += count;
            tally.total_word_length += word.chars().count() as u64 * count;
            tally.total_syllables += u64::from(entry.syllables) * count;
            for category in entry.categories.iter() {
                tally.category_counts[category.index()] += count;
            }
        }
        tally
    }

    /// Report row for this filing, identified by its header; the size column is 0
    pub fn statistics(&self, lexicon: &Lexicon) -> DocumentStatistics {
        DocumentStatistics::from_tally(self.header.as_str(), 0, &self.tally(lexicon))
    }
}

/// Streams [`DocDictRecord`]s out of a reader, skipping blank lines
pub struct DocDictReader<'a, R> {
    lines: Lines<R>,
    lexicon: &'a Lexicon,
    line: u64,
}

impl<'a, R: BufRead> DocDictReader<'a, R> {
    pub fn new(reader: R, lexicon: &'a Lexicon) -> Self {
        DocDictReader {
            lines: reader.lines(),
            lexicon,
            line: 0,
        }
    }
}

impl<R: BufRead> Iterator for DocDictReader<'_, R> {
    type Item = Result<DocDictRecord, LexiconError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(err) => return Some(Err(err.into())),
            };
            self.line += 1;
            if text.trim().is_empty() {
                continue;
            }
            return Some(DocDictRecord::parse(self.line, &text, self.lexicon));
        }
    }
}

fn malformed(line: u64, message: impl Into<String>) -> LexiconError {
    LexiconError::MalformedEntry {
        line,
        message: message.into(),
    }
}
