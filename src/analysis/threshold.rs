//! Hit/miss threshold detection by the maximum-gap method
//!
//! Cache hits cluster at low cycle counts and misses at high ones. Sorting
//! every sample and taking the largest step between neighbours gives the
//! boundary between the two clusters without any hardware-specific latency
//! constants.
//!
//! A single extreme outlier can produce the largest gap on its own. Outliers
//! are not filtered here; callers that care should cap their samples first
//! (see [`crate::stats::cap_at_percentile`]).
//!
//! With several gaps of equal size the lowest one wins.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Inferred boundary between hit and miss latencies, in cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    /// Midpoint of the largest gap
    pub value: f64,
    /// Sorted sample just below the gap
    pub lower: u64,
    /// Sorted sample just above the gap
    pub upper: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    LikelyHit,
    LikelyMiss,
}

/// Hit and miss tallies for one sample set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SplitCounts {
    pub hits: usize,
    pub misses: usize,
}

impl Threshold {
    /// Detect the threshold over samples in any order.
    pub fn detect(samples: &[u64]) -> Result<Self> {
        let mut sorted = samples.to_vec();
        sorted.sort_unstable();
        Self::from_sorted(&sorted)
    }

    /// Detect the threshold over samples already sorted ascending.
    pub fn from_sorted(sorted: &[u64]) -> Result<Self> {
        if sorted.len() < 2 {
            return Err(AnalysisError::InsufficientData {
                found: sorted.len(),
            });
        }
        debug_assert!(sorted.windows(2).all(|w| w[0] <= w[1]));

        let mut best = 0;
        let mut best_gap = 0;
        for (i, pair) in sorted.windows(2).enumerate() {
            let gap = pair[1] - pair[0];
            if gap > best_gap {
                best_gap = gap;
                best = i;
            }
        }

        let (lower, upper) = (sorted[best], sorted[best + 1]);
        Ok(Self {
            value: (lower as f64 + upper as f64) / 2.0,
            lower,
            upper,
        })
    }

    /// Width of the gap that produced this threshold
    pub fn gap(&self) -> u64 {
        self.upper.saturating_sub(self.lower)
    }

    pub fn classify(&self, cycles: u64) -> Classification {
        if cycles as f64 <= self.value {
            Classification::LikelyHit
        } else {
            Classification::LikelyMiss
        }
    }

    pub fn split_counts(&self, samples: &[u64]) -> SplitCounts {
        samples
            .iter()
            .fold(SplitCounts::default(), |mut acc, &x| {
                match self.classify(x) {
                    Classification::LikelyHit => acc.hits += 1,
                    Classification::LikelyMiss => acc.misses += 1,
                }
                acc
            })
    }
}
