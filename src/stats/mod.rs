//! Statistics over timing samples
//!
//! Descriptive statistics per address and over the whole matrix, plus the
//! percentile helpers used for outlier capping.

pub mod descriptive;
pub mod percentile;

pub use descriptive::{
    global_stats, mean, median, per_address_stats, std_dev, AddressStats, GlobalStats, Summary,
};
pub use percentile::{cap_at_percentile, percentile, Capped};
