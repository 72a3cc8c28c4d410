//! Percentiles and the optional outlier cap applied before histogram binning.

use crate::error::{AnalysisError, Result};

/// Percentile of ascending-sorted data, interpolating linearly between the
/// two closest ranks.
pub fn percentile(sorted: &[u64], p: f64) -> Result<f64> {
    if sorted.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }
    let rank = (p.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Ok(sorted[lo] as f64 + (sorted[hi] as f64 - sorted[lo] as f64) * frac)
}

/// Samples kept after capping at a percentile.
#[derive(Debug, Clone, PartialEq)]
pub struct Capped {
    pub kept: Vec<u64>,
    pub dropped: usize,
    pub cutoff: f64,
}

/// Drop every sample strictly above the `p`th percentile, keeping input order.
pub fn cap_at_percentile(samples: &[u64], p: f64) -> Result<Capped> {
    let mut sorted = samples.to_vec();
    sorted.sort_unstable();
    let cutoff = percentile(&sorted, p)?;

    let kept: Vec<u64> = samples
        .iter()
        .copied()
        .filter(|&x| x as f64 <= cutoff)
        .collect();
    Ok(Capped {
        dropped: samples.len() - kept.len(),
        kept,
        cutoff,
    })
}
