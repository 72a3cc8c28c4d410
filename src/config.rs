//! Analysis settings
//!
//! Settings are stored as JSON (`analysissettings.json` by convention) with
//! PascalCase keys. Every key is optional; missing keys take their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AnalysisError, Result};

/// Default histogram bin count
pub const DEFAULT_BINS: usize = 20;

/// Tunables for a single analysis run
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisSettings {
    #[serde(rename = "Bins", deserialize_with = "validate_positive_usize")]
    pub bins: usize,
    /// Samples above this percentile are dropped before histogram binning.
    #[serde(rename = "OutlierPercentile", deserialize_with = "validate_percentile")]
    pub outlier_percentile: Option<f64>,
    /// When false, a threshold stage with too few samples is skipped instead of failing the run.
    #[serde(rename = "RequireThreshold")]
    pub require_threshold: bool,
    #[serde(rename = "ParallelAddresses")]
    pub parallel_addresses: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            bins: DEFAULT_BINS,
            outlier_percentile: None,
            require_threshold: true,
            parallel_addresses: true,
        }
    }
}

fn validate_positive_usize<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = usize::deserialize(deserializer)?;
    if value > 0 {
        Ok(value)
    } else {
        Err(serde::de::Error::custom("Value must be positive"))
    }
}

fn validate_percentile<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        Some(p) if p > 0.0 && p <= 100.0 => Ok(Some(p)),
        Some(_) => Err(serde::de::Error::custom("Percentile must be in (0, 100]")),
        None => Ok(None),
    }
}

impl AnalysisSettings {
    /// Parse settings from a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        debug!(path = %path.display(), "Loaded analysis settings");
        Self::from_json_str(&content)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check invariants for settings built in code rather than deserialized.
    pub fn validate(&self) -> Result<()> {
        if self.bins == 0 {
            return Err(AnalysisError::InvalidSettings(
                "Bins must be at least 1".to_string(),
            ));
        }
        if let Some(p) = self.outlier_percentile {
            if !(p > 0.0 && p <= 100.0) {
                return Err(AnalysisError::InvalidSettings(format!(
                    "OutlierPercentile must be in (0, 100], got {}",
                    p
                )));
            }
        }
        Ok(())
    }
}
