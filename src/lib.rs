//! Cache Timing Analysis Library
//!
//! Turns per-address cache access latencies into descriptive statistics, a
//! hit/miss threshold and a histogram, ready for an external report or plot.

pub mod analysis;
pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod stats;

pub use crate::analysis::{Bin, Classification, Histogram, Threshold};
pub use crate::config::AnalysisSettings;
pub use crate::core::{analyze, analyze_concurrent, analyze_path, AddressClassification, AnalysisReport};
pub use crate::data::{load_csv_path, load_csv_reader, AddressRow, SampleMatrix};
pub use crate::error::{AnalysisError, Result};
pub use crate::stats::{AddressStats, GlobalStats, Summary};

/// Library version
pub const VERSION: &str = "0.1.0";
