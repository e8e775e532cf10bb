//! Master Dictionary loader
//!
//! Reads the Loughran-McDonald Master Dictionary CSV. Columns are matched by header
//! name, so extra columns (`Word Count`, `Doc Count`, `Complexity`, `Source`, ...) are
//! ignored. Category columns hold the year a word joined that list: `0` means it
//! never did and a negative year means it was later removed.

use super::{Categories, Category, Lexicon, LexiconBuilder};
use crate::error::LexiconError;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct MasterDictionaryRow {
    #[serde(rename = "Word")]
    word: String,
    #[serde(rename = "Seq_num")]
    sequence_number: u64,
    #[serde(rename = "Negative")]
    negative: i64,
    #[serde(rename = "Positive")]
    positive: i64,
    #[serde(rename = "Uncertainty")]
    uncertainty: i64,
    #[serde(rename = "Litigious")]
    litigious: i64,
    #[serde(rename = "Strong_Modal")]
    strong_modal: i64,
    #[serde(rename = "Weak_Modal")]
    weak_modal: i64,
    #[serde(rename = "Constraining")]
    constraining: i64,
    #[serde(rename = "Syllables")]
    syllables: u32,
}

impl MasterDictionaryRow {
    fn categories(&self) -> Categories {
        [
            (Category::Negative, self.negative),
            (Category::Positive, self.positive),
            (Category::Uncertainty, self.uncertainty),
            (Category::Litigious, self.litigious),
            (Category::StrongModal, self.strong_modal),
            (Category::WeakModal, self.weak_modal),
            (Category::Constraining, self.constraining),
        ]
        .into_iter()
        .filter(|(_, year)| *year > 0)
        .map(|(category, _)| category)
        .collect()
    }
}

impl Lexicon {
    /// Load a Master Dictionary CSV from disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Lexicon, LexiconError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let lexicon = Lexicon::from_reader(BufReader::new(file))?;
        tracing::info!(
            entries = lexicon.len(),
            path = %path.display(),
            "loaded master dictionary"
        );
        Ok(lexicon)
    }

    /// Load a Master Dictionary CSV from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Lexicon, LexiconError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers().map_err(from_csv)?.clone();

        let mut builder = LexiconBuilder::new();
        let mut record = csv::StringRecord::new();
        while csv_reader.read_record(&mut record).map_err(from_csv)? {
            let line = record.position().map_or(0, |p| p.line());
            let row: MasterDictionaryRow =
                record
                    .deserialize(Some(&headers))
                    .map_err(|err| LexiconError::MalformedEntry {
                        line,
                        message: err.to_string(),
                    })?;
            builder.insert_at(
                line,
                &row.word,
                row.sequence_number,
                row.categories(),
                row.syllables,
            )?;
        }

        Ok(builder.build())
    }
}

fn from_csv(err: csv::Error) -> LexiconError {
    let line = err.position().map_or(0, |p| p.line());
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io) => LexiconError::Io(io),
        _ => LexiconError::MalformedEntry { line, message },
    }
}
