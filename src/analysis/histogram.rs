//! Equal-width histogram binning
//!
//! The range `[min, max]` of the data is split into `B` bins of width
//! `(max - min) / B`. A sample goes to bin `min(B - 1, floor((x - min) / width))`,
//! so the maximum lands in the last bin. When every sample is equal the width
//! is zero and all samples go to bin 0.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub range_start: f64,
    pub range_end: f64,
    pub count: usize,
}

/// Frequency counts over contiguous, equal-width bins in ascending order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub min: u64,
    pub max: u64,
    bins: Vec<Bin>,
}

impl Histogram {
    /// Bin a non-empty sample set into `bins` buckets.
    pub fn build(samples: &[u64], bins: usize) -> Result<Self> {
        if bins == 0 {
            return Err(AnalysisError::InvalidBinCount(bins));
        }
        let (min, max) = match (samples.iter().min(), samples.iter().max()) {
            (Some(&min), Some(&max)) => (min, max),
            _ => return Err(AnalysisError::EmptyDataset),
        };

        let width = (max - min) as f64 / bins as f64;
        let mut counts: Vec<usize> = Vec::new();
        counts
            .try_reserve_exact(bins)
            .map_err(|_| AnalysisError::InvalidBinCount(bins))?;
        counts.resize(bins, 0);
        for &x in samples {
            let idx = if width > 0.0 {
                (((x - min) as f64 / width).floor() as usize).min(bins - 1)
            } else {
                0
            };
            counts[idx] += 1;
        }

        let last = bins - 1;
        let edge = |i: usize| min as f64 + i as f64 * width;
        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| Bin {
                range_start: edge(i),
                range_end: if i == last { max as f64 } else { edge(i + 1) },
                count,
            })
            .collect();

        Ok(Self { min, max, bins })
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn bin_width(&self) -> f64 {
        self.max.saturating_sub(self.min) as f64 / self.bins.len() as f64
    }

    /// Number of binned samples
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}
