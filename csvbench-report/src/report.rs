//! Report Data Structures

use chrono::{DateTime, Utc};
use csvbench_corpus::{Scenario, ScenarioSummary};
use serde::{Deserialize, Serialize};

/// Complete benchmark sweep report.
///
/// Write-once: assembled after all scenarios complete and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Environment metadata.
    pub meta: ReportMeta,
    /// Sweep settings the run was executed with.
    pub settings: SweepSettings,
    /// Catalog-level summary of the scenarios swept.
    pub scenario_summary: ScenarioSummary,
    /// Per-scenario results, in sweep order.
    pub scenarios: Vec<ScenarioReport>,
    /// Scenarios whose corpus build failed; the sweep continued past them.
    pub skipped: Vec<SkippedScenario>,
    /// Cross-scenario ranking of executables.
    pub overall: Vec<OverallRanking>,
}

/// Environment metadata captured once per report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// csvbench version that produced the report.
    pub version: String,
    /// UTC time the report was assembled.
    pub timestamp: DateTime<Utc>,
    /// Operating system name.
    pub os: String,
    /// Machine architecture.
    pub arch: String,
    /// CPU model name, `"Unknown"` where unavailable.
    pub cpu: String,
    /// Available CPU core count.
    pub cpu_cores: u32,
}

/// Sweep settings captured in the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepSettings {
    /// Benchmark iterations per executable×scenario pair.
    pub iterations: u32,
    /// Per-invocation timeout in seconds.
    pub timeout_secs: u64,
    /// Worker count used for corpus generation.
    pub generation_workers: usize,
    /// Whether generated corpus files were retained after benchmarking.
    pub keep_corpus: bool,
}

/// Results for one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// The scenario configuration this corpus was generated from.
    pub scenario: Scenario,
    /// Generated corpus size in MB.
    pub corpus_size_mb: f64,
    /// Corpus generation wall time in seconds.
    pub generation_secs: f64,
    /// Per-executable outcomes, ranked: successes by descending mean
    /// throughput, then failures.
    pub rankings: Vec<ParserReport>,
}

/// One executable's ranked outcome within a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserReport {
    /// Rank within the scenario, starting at 1.
    pub rank: u32,
    /// Executable name.
    pub parser: String,
    /// Aggregate statistics or total-failure record.
    pub outcome: ParserOutcome,
}

/// Aggregated outcome for one executable×scenario pair.
///
/// A pair with zero successful iterations is a [`ParserOutcome::Failed`]
/// record, never zero-valued statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ParserOutcome {
    /// At least one iteration succeeded.
    Success(AggregateStat),
    /// Every iteration failed.
    Failed(FailureRecord),
}

impl ParserOutcome {
    /// The aggregate statistics, if any iteration succeeded.
    pub fn stats(&self) -> Option<&AggregateStat> {
        match self {
            ParserOutcome::Success(stats) => Some(stats),
            ParserOutcome::Failed(_) => None,
        }
    }

    /// Whether at least one iteration succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, ParserOutcome::Success(_))
    }
}

/// Statistics over the successful iterations of one executable×scenario
/// pair. Derived, never constructed directly by callers; recomputed from
/// the backing run results, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStat {
    /// Number of successful iterations.
    pub successful_runs: u32,
    /// Number of failed iterations.
    pub failed_runs: u32,
    /// Mean throughput in MB/s over successful iterations.
    pub mean_throughput_mb_s: f64,
    /// Median throughput in MB/s.
    pub median_throughput_mb_s: f64,
    /// Minimum throughput in MB/s.
    pub min_throughput_mb_s: f64,
    /// Maximum (peak) throughput in MB/s.
    pub max_throughput_mb_s: f64,
    /// Sample standard deviation of throughput in MB/s.
    pub std_dev_throughput_mb_s: f64,
    /// Mean execution wall time in seconds.
    pub mean_time_secs: f64,
    /// Fastest execution wall time in seconds.
    pub fastest_time_secs: f64,
    /// Slowest execution wall time in seconds.
    pub slowest_time_secs: f64,
}

/// Record of a pair whose every iteration failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Number of failed iterations (all of them).
    pub failed_runs: u32,
    /// Human-readable reason.
    pub reason: String,
    /// Failure kind of each iteration, in order.
    pub failure_kinds: Vec<String>,
}

/// A scenario skipped because its corpus build failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedScenario {
    /// The scenario that could not be built.
    pub scenario: Scenario,
    /// The build error.
    pub error: String,
}

/// Cross-scenario ranking entry for one executable.
///
/// The primary ranking number is the average of per-scenario mean
/// throughputs over scenarios with at least one successful run. The
/// completion rate is a secondary signal reported alongside, never
/// blended into the primary number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverallRanking {
    /// Overall rank, starting at 1.
    pub rank: u32,
    /// Executable name.
    pub parser: String,
    /// Average of per-scenario mean throughputs, MB/s.
    pub mean_throughput_mb_s: f64,
    /// Best per-scenario mean throughput, MB/s.
    pub max_throughput_mb_s: f64,
    /// Scenarios with at least one successful run.
    pub scenarios_completed: usize,
    /// Total scenarios in the sweep.
    pub total_scenarios: usize,
    /// `scenarios_completed / total_scenarios`.
    pub completion_rate: f64,
}
