//! Report writers
//!
//! CSV reports always start with the header row, even when no file was scanned.
//! JSON reports hold one object per line; NaN ratios become `null`.

use anyhow::{Context, Result};
use sraf_config::{OutputConfig, OutputFormat};
use sraf_parser::{DocumentStatistics, REPORT_FIELDS};
use std::io::Write;

pub fn write_report<W: Write>(
    writer: W,
    output: &OutputConfig,
    rows: &[DocumentStatistics],
) -> Result<()> {
    match output.format {
        OutputFormat::Csv => write_csv(writer, output.delimiter, rows),
        OutputFormat::Json => write_json(writer, rows),
    }
}

fn write_csv<W: Write>(writer: W, delimiter: char, rows: &[DocumentStatistics]) -> Result<()> {
    let delimiter = u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| format!("delimiter '{delimiter}' must be a single ASCII character"))?;

    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    if rows.is_empty() {
        csv_writer.write_record(REPORT_FIELDS)?;
    }
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn write_json<W: Write>(mut writer: W, rows: &[DocumentStatistics]) -> Result<()> {
    for row in rows {
        serde_json::to_writer(&mut writer, row)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}
