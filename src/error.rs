//! Error types for timing analysis.

use thiserror::Error;

/// Errors that can occur while loading or analysing timing samples.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A field could not be parsed as a non-negative integer
    #[error("malformed input at line {line}, column {column}: '{value}' is not a non-negative integer")]
    MalformedInput {
        line: u64,
        column: usize,
        value: String,
    },

    /// A data row has a different number of samples than the first row
    #[error("line {line} has {found} samples, expected {expected}")]
    InconsistentRowLength {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// A data row has an address but no samples
    #[error("line {line} has an address but no samples")]
    MissingSamples { line: u64 },

    /// The same address appears on more than one row
    #[error("duplicate address {address} at line {line}")]
    DuplicateAddress { line: u64, address: u64 },

    /// The input has no data rows
    #[error("input contains no data rows")]
    EmptyInput,

    /// A statistic was requested over zero samples
    #[error("cannot compute statistics over an empty dataset")]
    EmptyDataset,

    /// Gap detection needs at least two samples
    #[error("threshold detection needs at least 2 samples, got {found}")]
    InsufficientData { found: usize },

    /// Histogram bin count must be at least 1
    #[error("invalid histogram bin count: {0}")]
    InvalidBinCount(usize),

    /// Settings failed validation
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV framing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A worker task panicked or was cancelled
    #[error("analysis task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
