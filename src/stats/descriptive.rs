//! Descriptive statistics over cycle-count samples
//!
//! All functions are pure and reject empty input rather than inventing a
//! value for it.

use serde::{Deserialize, Serialize};

use crate::data::SampleMatrix;
use crate::error::{AnalysisError, Result};

/// Arithmetic mean.
pub fn mean(samples: &[u64]) -> Result<f64> {
    if samples.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }
    let sum: u128 = samples.iter().map(|&x| x as u128).sum();
    Ok(sum as f64 / samples.len() as f64)
}

/// Middle value; the average of the two central values for even counts.
pub fn median(samples: &[u64]) -> Result<f64> {
    if samples.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }
    let mut sorted = samples.to_vec();
    sorted.sort_unstable();
    Ok(median_of_sorted(&sorted))
}

fn median_of_sorted(sorted: &[u64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    } else {
        sorted[mid] as f64
    }
}

/// Population standard deviation (divides by N).
pub fn std_dev(samples: &[u64]) -> Result<f64> {
    let m = mean(samples)?;
    Ok(std_dev_about(samples, m))
}

fn std_dev_about(samples: &[u64], mean: f64) -> f64 {
    let variance = samples
        .iter()
        .map(|&x| (x as f64 - mean).powi(2))
        .sum::<f64>()
        / samples.len() as f64;
    variance.sqrt()
}

/// Mean, median, spread and extrema of one sample set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: u64,
    pub max: u64,
}

/// Statistics over every sample of every address.
pub type GlobalStats = Summary;

impl Summary {
    /// Summarize a non-empty sample set.
    pub fn from_samples(samples: &[u64]) -> Result<Self> {
        if samples.is_empty() {
            return Err(AnalysisError::EmptyDataset);
        }
        let mut sorted = samples.to_vec();
        sorted.sort_unstable();

        let mean = mean(&sorted)?;
        Ok(Self {
            mean,
            median: median_of_sorted(&sorted),
            std_dev: std_dev_about(&sorted, mean),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
        })
    }
}

/// Summary for a single address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressStats {
    pub address: u64,
    #[serde(flatten)]
    pub summary: Summary,
}

/// Statistics over the flattened union of all rows.
pub fn global_stats(matrix: &SampleMatrix) -> Result<GlobalStats> {
    Summary::from_samples(&matrix.flatten())
}

/// One [`AddressStats`] per row, in input order.
pub fn per_address_stats(matrix: &SampleMatrix) -> Result<Vec<AddressStats>> {
    matrix
        .rows()
        .iter()
        .map(|row| -> Result<AddressStats> {
            Ok(AddressStats {
                address: row.address,
                summary: Summary::from_samples(&row.samples)?,
            })
        })
        .collect()
}
