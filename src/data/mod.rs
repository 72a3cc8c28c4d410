//! Per-address timing samples.
//!
//! A [`SampleMatrix`] holds one row per probed address. Every row carries the
//! same number of trials, measured in clock cycles.

pub mod loader;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

pub use loader::{load_csv_path, load_csv_reader};

/// One probed address and its latency samples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRow {
    pub address: u64,
    pub samples: Vec<u64>,
}

/// Rows of latency samples in input order.
///
/// Addresses are unique and every row has the same, non-zero sample count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleMatrix {
    rows: Vec<AddressRow>,
    trials: usize,
}

impl SampleMatrix {
    /// Build a matrix from in-memory rows, checking the row invariants.
    ///
    /// Line numbers in errors are 1-based row indices, counting a virtual
    /// header line, so they match what the CSV loader would report.
    pub fn from_rows(rows: Vec<AddressRow>) -> Result<Self> {
        let lines: Vec<u64> = (0..rows.len() as u64).map(|i| i + 2).collect();
        Self::from_rows_at_lines(rows, &lines)
    }

    /// Same as [`SampleMatrix::from_rows`], with the source line of each row
    /// supplied by the caller.
    pub(crate) fn from_rows_at_lines(rows: Vec<AddressRow>, lines: &[u64]) -> Result<Self> {
        let first = rows.first().ok_or(AnalysisError::EmptyInput)?;
        let trials = first.samples.len();
        let mut seen = HashSet::with_capacity(rows.len());

        for (row, &line) in rows.iter().zip(lines) {
            if row.samples.is_empty() {
                return Err(AnalysisError::MissingSamples { line });
            }
            if row.samples.len() != trials {
                return Err(AnalysisError::InconsistentRowLength {
                    line,
                    expected: trials,
                    found: row.samples.len(),
                });
            }
            if !seen.insert(row.address) {
                return Err(AnalysisError::DuplicateAddress {
                    line,
                    address: row.address,
                });
            }
        }

        Ok(Self { rows, trials })
    }

    pub fn rows(&self) -> &[AddressRow] {
        &self.rows
    }

    /// Addresses in input order
    pub fn addresses(&self) -> Vec<u64> {
        self.rows.iter().map(|r| r.address).collect()
    }

    /// Samples per row
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total sample count across all rows
    pub fn sample_count(&self) -> usize {
        self.rows.len() * self.trials
    }

    pub fn row(&self, address: u64) -> Option<&AddressRow> {
        self.rows.iter().find(|r| r.address == address)
    }

    /// Row-major concatenation of every sample.
    pub fn flatten(&self) -> Vec<u64> {
        let mut all = Vec::with_capacity(self.sample_count());
        for row in &self.rows {
            all.extend_from_slice(&row.samples);
        }
        all
    }
}
