//! Sweep Configuration

use csvbench_report::SweepSettings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for one benchmark sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Benchmark iterations per executable×scenario pair.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Timeout for a single benchmark invocation, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Worker count for corpus generation.
    #[serde(default = "default_generation_workers")]
    pub generation_workers: usize,
    /// Keep generated corpus files instead of deleting them after each
    /// scenario's benchmark pass.
    #[serde(default)]
    pub keep_corpus: bool,
    /// Directory corpus files are written to.
    #[serde(default = "default_corpus_dir")]
    pub corpus_dir: PathBuf,
}

impl SweepConfig {
    /// Per-invocation timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            iterations: default_iterations(),
            timeout_secs: default_timeout_secs(),
            generation_workers: default_generation_workers(),
            keep_corpus: false,
            corpus_dir: default_corpus_dir(),
        }
    }
}

impl From<&SweepConfig> for SweepSettings {
    fn from(config: &SweepConfig) -> Self {
        SweepSettings {
            iterations: config.iterations,
            timeout_secs: config.timeout_secs,
            generation_workers: config.generation_workers,
            keep_corpus: config.keep_corpus,
        }
    }
}

fn default_iterations() -> u32 {
    3
}

fn default_timeout_secs() -> u64 {
    180
}

/// Leave two cores for the system, as the original tuning did.
fn default_generation_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get().saturating_sub(2))
        .unwrap_or(1)
        .max(1)
}

fn default_corpus_dir() -> PathBuf {
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SweepConfig::default();
        assert_eq!(config.iterations, 3);
        assert_eq!(config.timeout_secs, 180);
        assert!(config.generation_workers >= 1);
        assert!(!config.keep_corpus);
    }

    #[test]
    fn test_settings_capture() {
        let config = SweepConfig {
            iterations: 5,
            timeout_secs: 60,
            generation_workers: 2,
            keep_corpus: true,
            corpus_dir: PathBuf::from("/tmp"),
        };
        let settings = SweepSettings::from(&config);
        assert_eq!(settings.iterations, 5);
        assert_eq!(settings.timeout_secs, 60);
        assert_eq!(settings.generation_workers, 2);
        assert!(settings.keep_corpus);
    }
}
