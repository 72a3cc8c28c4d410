//! Threshold detection and histogram binning over timing samples.

pub mod histogram;
pub mod threshold;

pub use histogram::{Bin, Histogram};
pub use threshold::{Classification, SplitCounts, Threshold};
