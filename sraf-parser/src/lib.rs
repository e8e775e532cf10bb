//! # sraf-parser
//!
//! Loughran-McDonald sentiment scanning for SEC filing text.
//!
//! Load the Master Dictionary once, then scan any number of documents against it:
//!
//! ```rust,ignore
//! use sraf_parser::{Document, Lexicon, Scanner};
//!
//! let lexicon = Lexicon::from_path("LoughranMcDonald_MasterDictionary.csv")?;
//! let scanner = Scanner::new(&lexicon)?;
//! let stats = scanner.scan(&Document::from_path("10-K.txt")?);
//! println!("{} words, {:.2}% negative", stats.word_count, stats.negative);
//! ```
//!
//! Module layout
//!
//!   lexicon      Dictionary model, builder and Master Dictionary CSV loader
//!   scanning     Preparation, tokenizing and counting (the scanner itself)
//!   statistics   Raw tally and the sixteen-field report record
//!   document     Document text plus the identifier and size reported with it
//!   docdict      Decoding of Document Dictionary word-count lines
//!   error        Load-time and scan-time errors
//!
//! The scanner performs no I/O and no logging; reporting belongs to the caller.

pub mod docdict;
pub mod document;
pub mod error;
pub mod lexicon;
pub mod scanning;
pub mod statistics;

pub use docdict::{DocDictReader, DocDictRecord};
pub use document::Document;
pub use error::{LexiconError, ScanError};
pub use lexicon::{Categories, Category, Lexicon, LexiconBuilder, LexiconEntry};
pub use scanning::{scan, MonthFilter, Scanner};
pub use statistics::{DocumentStatistics, Tally, REPORT_FIELDS};
