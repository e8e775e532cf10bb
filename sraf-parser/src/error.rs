//! Error types for lexicon loading and scanning
//!
//! Lexicon and Document Dictionary problems are reported while loading, never
//! during a scan. The scanner itself has a single precondition failure: an empty
//! lexicon.

/// Errors raised while loading a lexicon or decoding dictionary-keyed input
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    /// A row is missing a column or carries a value that does not parse
    #[error("malformed entry at line {line}: {message}")]
    MalformedEntry { line: u64, message: String },

    #[error("lexicon entry at line {line} has an empty word")]
    EmptyWord { line: u64 },

    #[error("duplicate lexicon word '{word}' at line {line}")]
    DuplicateWord { word: String, line: u64 },

    #[error("duplicate sequence number {sequence_number} at line {line}")]
    DuplicateSequence { sequence_number: u64, line: u64 },

    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the scanner
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// The scanner was handed a lexicon with no entries
    #[error("lexicon is empty; load a lexicon before scanning")]
    MissingLexicon,
}
