//! Sweep Orchestration and Aggregation
//!
//! Runs the build–test–remove cycle: for each scenario in catalog order,
//! generate its corpus, run every executable `iterations` times against
//! it, aggregate and rank, then delete the corpus so peak disk usage
//! stays at roughly one corpus file.
//!
//! Error policy: a corpus build failure skips that scenario and the sweep
//! continues; execution failures are per-iteration data; a pair with zero
//! successes degrades to a failure record. The sweep itself always
//! completes and always produces a report.

use crate::config::SweepConfig;
use crate::executor::{BenchmarkExecutor, RunResult};
use crate::metadata::build_report_meta;
use csvbench_corpus::{CorpusBuilder, CorpusMeta, Scenario, summarize};
use csvbench_report::{
    AggregateStat, FailureRecord, OverallRanking, ParserOutcome, ParserReport, Report,
    ScenarioReport, SkippedScenario, SweepSettings,
};
use csvbench_stats::compute_summary;
use fxhash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// A full benchmark sweep over a set of executables and scenarios.
///
/// Executables are keyed by display name and visited in name order, so
/// two sweeps over the same inputs run the same schedule.
pub struct Sweep {
    config: SweepConfig,
    executables: BTreeMap<String, PathBuf>,
}

impl Sweep {
    /// Create a sweep over the given named executables.
    pub fn new(config: SweepConfig, executables: BTreeMap<String, PathBuf>) -> Self {
        Sweep {
            config,
            executables,
        }
    }

    /// Run the sweep and assemble the report.
    ///
    /// Never fails as a whole: skipped scenarios and failed pairs are
    /// recorded in the report instead of propagating.
    pub fn run(&self, scenarios: &[Scenario]) -> Report {
        let executor = BenchmarkExecutor::new(self.config.timeout());
        let builder = CorpusBuilder::new(self.config.generation_workers);

        let mut scenario_reports = Vec::new();
        let mut skipped = Vec::new();

        for (index, scenario) in scenarios.iter().enumerate() {
            info!(
                scenario = %scenario.name,
                index = index + 1,
                total = scenarios.len(),
                "running scenario"
            );

            let corpus_path = self.config.corpus_dir.join(scenario.file_name());
            let meta = match builder.build(scenario, &corpus_path) {
                Ok(meta) => meta,
                Err(e) => {
                    warn!(scenario = %scenario.name, error = %e, "corpus build failed, scenario skipped");
                    skipped.push(SkippedScenario {
                        scenario: scenario.clone(),
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            let rankings = self.benchmark_corpus(&executor, &meta);

            if !self.config.keep_corpus {
                match fs::remove_file(&meta.path) {
                    Ok(()) => debug!(path = %meta.path.display(), "removed corpus"),
                    Err(e) => warn!(path = %meta.path.display(), error = %e, "failed to remove corpus"),
                }
            }

            scenario_reports.push(ScenarioReport {
                scenario: scenario.clone(),
                corpus_size_mb: meta.size_mb(),
                generation_secs: meta.generation_time.as_secs_f64(),
                rankings,
            });
        }

        let overall = rank_overall(&scenario_reports, scenarios.len());

        Report {
            meta: build_report_meta(),
            settings: SweepSettings::from(&self.config),
            scenario_summary: summarize(scenarios),
            scenarios: scenario_reports,
            skipped,
            overall,
        }
    }

    /// Run every executable against one corpus, `iterations` times each,
    /// serially — child processes never overlap, so CPU contention cannot
    /// bias the timing samples.
    fn benchmark_corpus(
        &self,
        executor: &BenchmarkExecutor,
        meta: &CorpusMeta,
    ) -> Vec<ParserReport> {
        let mut entries = Vec::with_capacity(self.executables.len());

        for (name, executable) in &self.executables {
            let mut runs = Vec::with_capacity(self.config.iterations as usize);
            for iteration in 0..self.config.iterations {
                let result = executor.run_once(executable, &meta.path, meta.file_size_bytes);
                match &result {
                    RunResult::Success(s) => debug!(
                        parser = %name,
                        iteration,
                        throughput_mb_s = s.throughput_mb_s,
                        "iteration complete"
                    ),
                    RunResult::Failure(f) => warn!(
                        parser = %name,
                        iteration,
                        kind = f.kind(),
                        "iteration failed"
                    ),
                }
                runs.push(result);
            }
            entries.push((name.clone(), aggregate_runs(&runs)));
        }

        rank_scenario(entries)
    }
}

/// Aggregate one pair's iteration results.
///
/// Statistics cover successful runs only; zero successes produce a
/// failure record, never zero-valued stats.
fn aggregate_runs(runs: &[RunResult]) -> ParserOutcome {
    let successes: Vec<_> = runs.iter().filter_map(RunResult::success).collect();
    let failed_runs = (runs.len() - successes.len()) as u32;

    let throughputs: Vec<f64> = successes.iter().map(|s| s.throughput_mb_s).collect();
    let times: Vec<f64> = successes.iter().map(|s| s.duration_secs).collect();

    match (compute_summary(&throughputs), compute_summary(&times)) {
        (Some(throughput), Some(time)) => ParserOutcome::Success(AggregateStat {
            successful_runs: successes.len() as u32,
            failed_runs,
            mean_throughput_mb_s: throughput.mean,
            median_throughput_mb_s: throughput.median,
            min_throughput_mb_s: throughput.min,
            max_throughput_mb_s: throughput.max,
            std_dev_throughput_mb_s: throughput.std_dev,
            mean_time_secs: time.mean,
            fastest_time_secs: time.min,
            slowest_time_secs: time.max,
        }),
        _ => ParserOutcome::Failed(FailureRecord {
            failed_runs,
            reason: "all iterations failed".to_string(),
            failure_kinds: runs
                .iter()
                .filter_map(RunResult::failure)
                .map(|f| f.kind().to_string())
                .collect(),
        }),
    }
}

/// Rank one scenario's entries: successes by descending mean throughput,
/// failures last. The sort is stable, so ties keep name order.
fn rank_scenario(mut entries: Vec<(String, ParserOutcome)>) -> Vec<ParserReport> {
    entries.sort_by(|(_, a), (_, b)| match (a.stats(), b.stats()) {
        (Some(x), Some(y)) => y
            .mean_throughput_mb_s
            .partial_cmp(&x.mean_throughput_mb_s)
            .unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    entries
        .into_iter()
        .enumerate()
        .map(|(index, (parser, outcome))| ParserReport {
            rank: index as u32 + 1,
            parser,
            outcome,
        })
        .collect()
}

/// Rank executables across scenarios by the average of their
/// per-scenario mean throughputs, over scenarios where they had at least
/// one successful run. Executables with no successful scenario do not
/// appear.
fn rank_overall(scenario_reports: &[ScenarioReport], total_scenarios: usize) -> Vec<OverallRanking> {
    let mut per_parser: FxHashMap<&str, Vec<f64>> = FxHashMap::default();
    for report in scenario_reports {
        for entry in &report.rankings {
            if let Some(stats) = entry.outcome.stats() {
                per_parser
                    .entry(&entry.parser)
                    .or_default()
                    .push(stats.mean_throughput_mb_s);
            }
        }
    }

    let mut rankings: Vec<OverallRanking> = per_parser
        .into_iter()
        .map(|(parser, means)| {
            let completed = means.len();
            OverallRanking {
                rank: 0,
                parser: parser.to_string(),
                mean_throughput_mb_s: means.iter().sum::<f64>() / completed as f64,
                max_throughput_mb_s: means.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                scenarios_completed: completed,
                total_scenarios,
                completion_rate: completed as f64 / total_scenarios.max(1) as f64,
            }
        })
        .collect();

    rankings.sort_by(|a, b| {
        b.mean_throughput_mb_s
            .partial_cmp(&a.mean_throughput_mb_s)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.parser.cmp(&b.parser))
    });
    for (index, ranking) in rankings.iter_mut().enumerate() {
        ranking.rank = index as u32 + 1;
    }

    rankings
}
