//! Summary Statistics
//!
//! Computes the numeric summary behind each executable×scenario
//! aggregate: mean, median, sample standard deviation, min, max.

use crate::percentiles::compute_percentile;
use serde::{Deserialize, Serialize};

/// Summary statistics over one set of samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Arithmetic mean.
    pub mean: f64,
    /// Median (50th percentile, linear interpolation).
    pub median: f64,
    /// Sample standard deviation (n-1 denominator); 0.0 for fewer than
    /// two samples.
    pub std_dev: f64,
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
    /// Number of samples aggregated.
    pub sample_count: usize,
}

/// Compute summary statistics, or `None` for an empty sample set.
///
/// Never produces zero-valued statistics in place of missing data.
pub fn compute_summary(samples: &[f64]) -> Option<SummaryStatistics> {
    if samples.is_empty() {
        return None;
    }

    let n = samples.len();
    let mean = samples.iter().sum::<f64>() / n as f64;
    let median = compute_percentile(samples, 50.0);

    let std_dev = if n < 2 {
        0.0
    } else {
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        variance.sqrt()
    };

    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(SummaryStatistics {
        mean,
        median,
        std_dev,
        min,
        max,
        sample_count: n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        let stats = compute_summary(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();

        assert!((stats.mean - 5.0).abs() < f64::EPSILON);
        assert!((stats.median - 4.5).abs() < 0.01);
        // Sample std dev of this classic set is ~2.138
        assert!((stats.std_dev - 2.138).abs() < 0.01);
        assert!((stats.min - 2.0).abs() < f64::EPSILON);
        assert!((stats.max - 9.0).abs() < f64::EPSILON);
        assert_eq!(stats.sample_count, 8);
    }

    #[test]
    fn test_empty_samples_yield_none() {
        assert_eq!(compute_summary(&[]), None);
    }

    #[test]
    fn test_single_sample() {
        let stats = compute_summary(&[42.0]).unwrap();
        assert!((stats.mean - 42.0).abs() < f64::EPSILON);
        assert!((stats.median - 42.0).abs() < f64::EPSILON);
        assert!((stats.std_dev - 0.0).abs() < f64::EPSILON);
        assert!((stats.min - 42.0).abs() < f64::EPSILON);
        assert!((stats.max - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_two_samples() {
        let stats = compute_summary(&[10.0, 20.0]).unwrap();
        assert!((stats.mean - 15.0).abs() < f64::EPSILON);
        assert!((stats.median - 15.0).abs() < 0.01);
        // Sample std dev of {10, 20} is sqrt(50) ≈ 7.071
        assert!((stats.std_dev - 7.071).abs() < 0.01);
    }
}
