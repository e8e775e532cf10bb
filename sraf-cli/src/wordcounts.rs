//! Word counts from a Document Dictionary file

use anyhow::{Context, Result};
use serde_json::json;
use sraf_parser::{DocDictReader, DocDictRecord, DocumentStatistics, Lexicon};
use std::io::{BufRead, Write};

/// Decode up to `limit` filings
///
/// Decoding stops at the first malformed line, naming it.
pub fn read_records<R: BufRead>(
    reader: R,
    lexicon: &Lexicon,
    limit: Option<usize>,
) -> Result<Vec<DocDictRecord>> {
    let mut records = Vec::new();
    for record in DocDictReader::new(reader, lexicon) {
        if limit.is_some_and(|limit| records.len() >= limit) {
            break;
        }
        records.push(record.context("invalid document dictionary")?);
    }
    tracing::info!(filings = records.len(), "document dictionary decoded");
    Ok(records)
}

/// One JSON object per filing with its total and the requested word counts
///
/// With no targets every word in the filing is listed. Targets the filing does
/// not contain are left out.
pub fn write_counts<W: Write>(
    mut writer: W,
    records: &[DocDictRecord],
    targets: &[String],
) -> Result<()> {
    for record in records {
        let counts: serde_json::Map<String, serde_json::Value> = if targets.is_empty() {
            record
                .word_counts
                .iter()
                .map(|(word, count)| (word.clone(), json!(count)))
                .collect()
        } else {
            targets
                .iter()
                .filter_map(|word| record.word_counts.get_key_value(word))
                .map(|(word, count)| (word.clone(), json!(count)))
                .collect()
        };
        let row = json!({
            "line": record.line,
            "header": record.header,
            "total_words": record.total_words,
            "counts": counts,
        });
        serde_json::to_writer(&mut writer, &row)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Report rows rebuilt from the stored counts
pub fn statistics(records: &[DocDictRecord], lexicon: &Lexicon) -> Vec<DocumentStatistics> {
    records
        .iter()
        .map(|record| record.statistics(lexicon))
        .collect()
}
