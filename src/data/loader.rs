//! CSV parsing for per-address timing data.
//!
//! The expected layout is the one written by the cache timing probe:
//!
//! ```csv
//! Address,Time_0,Time_1,Time_2
//! 0,42,40,310
//! 64,41,298,305
//! ```
//!
//! The header row is skipped without inspection. Each data row is an integer
//! address followed by the same number of integer cycle counts.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder, Trim};
use tracing::{debug, info};

use super::{AddressRow, SampleMatrix};
use crate::error::{AnalysisError, Result};

/// Load a [`SampleMatrix`] from a CSV file on disk.
///
/// # Errors
/// Returns `AnalysisError` if the file cannot be read, a field is not a
/// non-negative integer, rows differ in length, or there are no data rows.
pub fn load_csv_path(path: impl AsRef<Path>) -> Result<SampleMatrix> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let matrix = load_csv_reader(file)?;
    info!(
        path = %path.display(),
        addresses = matrix.len(),
        trials = matrix.trials(),
        "Loaded timing samples"
    );
    Ok(matrix)
}

/// Load a [`SampleMatrix`] from any CSV byte source.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<SampleMatrix> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        // Row length is checked against the matrix invariant, not by the CSV framer.
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut lines = Vec::new();

    // Byte records, so a non-UTF-8 field is reported as malformed at its own line.
    for result in csv_reader.byte_records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        rows.push(parse_row(&record, line)?);
        lines.push(line);
    }

    if rows.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    debug!(rows = rows.len(), "Parsed data rows");
    SampleMatrix::from_rows_at_lines(rows, &lines)
}

fn parse_row(record: &ByteRecord, line: u64) -> Result<AddressRow> {
    let mut fields = record.iter().enumerate();

    let (_, address_field) = fields
        .next()
        .ok_or(AnalysisError::MissingSamples { line })?;
    let address = parse_field(address_field, line, 1)?;

    let samples = fields
        .map(|(i, field)| parse_field(field, line, i + 1))
        .collect::<Result<Vec<u64>>>()?;

    Ok(AddressRow { address, samples })
}

fn parse_field(value: &[u8], line: u64, column: usize) -> Result<u64> {
    std::str::from_utf8(value)
        .ok()
        .and_then(|text| text.parse().ok())
        .ok_or_else(|| AnalysisError::MalformedInput {
            line,
            column,
            value: String::from_utf8_lossy(value).into_owned(),
        })
}
