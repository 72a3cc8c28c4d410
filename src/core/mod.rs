//! Analysis pipeline
//!
//! Loads nothing by itself except through [`analyze_path`]; given a
//! [`SampleMatrix`] it computes global and per-address statistics, the
//! hit/miss threshold and the histogram, and bundles them into an
//! [`AnalysisReport`] for whatever renders the results.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::analysis::{Histogram, SplitCounts, Threshold};
use crate::config::AnalysisSettings;
use crate::data::{load_csv_path, SampleMatrix};
use crate::error::{AnalysisError, Result};
use crate::stats::{cap_at_percentile, global_stats, per_address_stats, AddressStats, GlobalStats, Summary};

// ============================================================================
// REPORT
// ============================================================================

/// Hit/miss tallies for one address under the detected threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressClassification {
    pub address: u64,
    #[serde(flatten)]
    pub counts: SplitCounts,
}

/// Everything the engine derives from one sample matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub global: GlobalStats,
    /// In input row order
    pub addresses: Vec<AddressStats>,
    /// `None` only when the threshold stage was allowed to be skipped.
    pub threshold: Option<Threshold>,
    /// Empty when there is no threshold.
    pub classification: Vec<AddressClassification>,
    pub histogram: Histogram,
    /// Samples left out of the histogram by the outlier cap
    pub outliers_dropped: usize,
}

impl AnalysisReport {
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ============================================================================
// STAGES
// ============================================================================

fn threshold_stage(all: &[u64], require: bool) -> Result<Option<Threshold>> {
    match Threshold::detect(all) {
        Ok(threshold) => {
            info!(
                threshold = threshold.value,
                lower = threshold.lower,
                upper = threshold.upper,
                "Detected hit/miss threshold"
            );
            Ok(Some(threshold))
        }
        Err(AnalysisError::InsufficientData { found }) if !require => {
            warn!(found, "Too few samples for threshold detection, skipping");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn histogram_stage(all: &[u64], settings: &AnalysisSettings) -> Result<(Histogram, usize)> {
    let (histogram, dropped) = match settings.outlier_percentile {
        Some(p) => {
            let capped = cap_at_percentile(all, p)?;
            debug!(
                percentile = p,
                cutoff = capped.cutoff,
                dropped = capped.dropped,
                "Capped samples before binning"
            );
            (Histogram::build(&capped.kept, settings.bins)?, capped.dropped)
        }
        None => (Histogram::build(all, settings.bins)?, 0),
    };
    info!(bins = settings.bins, width = histogram.bin_width(), "Built histogram");
    Ok((histogram, dropped))
}

fn classify_addresses(matrix: &SampleMatrix, threshold: Option<&Threshold>) -> Vec<AddressClassification> {
    let Some(threshold) = threshold else {
        return Vec::new();
    };
    matrix
        .rows()
        .iter()
        .map(|row| AddressClassification {
            address: row.address,
            counts: threshold.split_counts(&row.samples),
        })
        .collect()
}

// ============================================================================
// PIPELINES
// ============================================================================

/// Run every stage in sequence.
pub fn analyze(matrix: &SampleMatrix, settings: &AnalysisSettings) -> Result<AnalysisReport> {
    settings.validate()?;
    let all = matrix.flatten();

    let global = global_stats(matrix)?;
    let addresses = per_address_stats(matrix)?;
    info!(addresses = addresses.len(), mean = global.mean, "Computed statistics");

    let threshold = threshold_stage(&all, settings.require_threshold)?;
    let (histogram, outliers_dropped) = histogram_stage(&all, settings)?;
    let classification = classify_addresses(matrix, threshold.as_ref());

    Ok(AnalysisReport {
        global,
        addresses,
        threshold,
        classification,
        histogram,
        outliers_dropped,
    })
}

/// Run the stages as independent blocking tasks over shared read-only data
/// and join them into one report. The result matches [`analyze`].
pub async fn analyze_concurrent(
    matrix: Arc<SampleMatrix>,
    settings: AnalysisSettings,
) -> Result<AnalysisReport> {
    settings.validate()?;
    let all: Arc<[u64]> = matrix.flatten().into();

    let global_task = {
        let all = Arc::clone(&all);
        tokio::task::spawn_blocking(move || Summary::from_samples(&all))
    };

    let address_tasks = if settings.parallel_addresses {
        (0..matrix.len())
            .map(|i| {
                let matrix = Arc::clone(&matrix);
                tokio::task::spawn_blocking(move || {
                    let row = &matrix.rows()[i];
                    Summary::from_samples(&row.samples).map(|summary| {
                        vec![AddressStats {
                            address: row.address,
                            summary,
                        }]
                    })
                })
            })
            .collect::<Vec<_>>()
    } else {
        let matrix = Arc::clone(&matrix);
        vec![tokio::task::spawn_blocking(move || per_address_stats(&matrix))]
    };

    let threshold_task = {
        let all = Arc::clone(&all);
        let require = settings.require_threshold;
        tokio::task::spawn_blocking(move || threshold_stage(&all, require))
    };

    let histogram_task = {
        let all = Arc::clone(&all);
        let settings = settings.clone();
        tokio::task::spawn_blocking(move || histogram_stage(&all, &settings))
    };

    let global = global_task.await??;
    let mut addresses = Vec::with_capacity(matrix.len());
    for task in address_tasks {
        addresses.extend(task.await??);
    }
    info!(addresses = addresses.len(), mean = global.mean, "Computed statistics");

    let threshold = threshold_task.await??;
    let (histogram, outliers_dropped) = histogram_task.await??;
    let classification = classify_addresses(&matrix, threshold.as_ref());

    Ok(AnalysisReport {
        global,
        addresses,
        threshold,
        classification,
        histogram,
        outliers_dropped,
    })
}

/// Load a CSV file and analyse it.
pub fn analyze_path(path: impl AsRef<Path>, settings: &AnalysisSettings) -> Result<AnalysisReport> {
    let matrix = load_csv_path(path)?;
    analyze(&matrix, settings)
}
