#![warn(missing_docs)]
//! CSVBench Statistical Engine
//!
//! Aggregates noisy per-iteration timing samples into stable summaries:
//! - Mean, median, standard deviation, min, max over successful runs
//! - Percentile calculation with linear interpolation
//!
//! An empty sample set yields no statistics at all rather than zero-valued
//! ones — zero would be indistinguishable from a legitimately tiny
//! throughput.

mod percentiles;
mod summary;

pub use percentiles::compute_percentile;
pub use summary::{SummaryStatistics, compute_summary};
