//! Integration tests for the csvbench sweep pipeline.
//!
//! These drive the full build–test–remove cycle with small corpora and
//! fake parser executables (shell scripts) and verify the end-to-end
//! properties of the report.

use csvbench_corpus::{ContentStyle, CorpusBuilder, Scenario};
use csvbench_runner::{Sweep, SweepConfig};
use std::collections::BTreeMap;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn small_scenario(name: &str, rows: u64, cols: usize) -> Scenario {
    Scenario {
        name: name.to_string(),
        rows,
        cols,
        cell_size: 8,
        style: ContentStyle::Mixed,
        delimiter: ',',
        quoted: false,
        empty_cell_pct: 0,
        file_extension: "csv".to_string(),
    }
}

fn sweep_config(corpus_dir: &Path) -> SweepConfig {
    SweepConfig {
        iterations: 2,
        timeout_secs: 10,
        generation_workers: 2,
        keep_corpus: false,
        corpus_dir: corpus_dir.to_path_buf(),
    }
}

/// The spec's end-to-end scenario: 5000 rows × 8 mixed columns produce a
/// file of exactly 5001 lines, each data line with exactly 7 delimiters.
#[test]
fn test_corpus_shape_5000_rows_8_cols() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = small_scenario("csv_mixed_5000r_8c_8ch", 5000, 8);
    let path = dir.path().join(scenario.file_name());

    CorpusBuilder::new(4).build(&scenario, &path).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 5001);
    for line in &lines[1..] {
        assert_eq!(line.matches(',').count(), 7, "line {line:?}");
    }
}

#[test]
fn test_sweep_ranks_working_parser_above_broken_one() {
    let dir = tempfile::tempdir().unwrap();

    // "wc -c" prints the byte count: numeric stdout, exit 0.
    let good = write_script(dir.path(), "bench_good", "wc -c < \"$1\"");
    let bad = write_script(dir.path(), "bench_bad", "exit 2");

    let mut executables = BTreeMap::new();
    executables.insert("good".to_string(), good);
    executables.insert("bad".to_string(), bad);

    let scenarios = vec![small_scenario("csv_mixed_500r_4c_8ch", 500, 4)];
    let sweep = Sweep::new(sweep_config(dir.path()), executables);
    let report = sweep.run(&scenarios);

    assert_eq!(report.scenarios.len(), 1);
    assert!(report.skipped.is_empty());

    let rankings = &report.scenarios[0].rankings;
    assert_eq!(rankings.len(), 2);
    assert_eq!(rankings[0].parser, "good");
    assert_eq!(rankings[0].rank, 1);
    let stats = rankings[0].outcome.stats().expect("good parser succeeds");
    assert_eq!(stats.successful_runs, 2);
    assert_eq!(stats.failed_runs, 0);
    assert!(stats.mean_throughput_mb_s > 0.0);

    assert_eq!(rankings[1].parser, "bad");
    assert!(!rankings[1].outcome.is_success());

    // Only the working parser appears in the overall ranking.
    assert_eq!(report.overall.len(), 1);
    assert_eq!(report.overall[0].parser, "good");
    assert_eq!(report.overall[0].scenarios_completed, 1);
    assert!((report.overall[0].completion_rate - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_corpus_deleted_after_scenario_unless_kept() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_script(dir.path(), "bench_good", "wc -c < \"$1\"");
    let mut executables = BTreeMap::new();
    executables.insert("good".to_string(), good);

    let scenario = small_scenario("csv_mixed_200r_3c_8ch", 200, 3);
    let corpus_path = dir.path().join(scenario.file_name());

    let sweep = Sweep::new(sweep_config(dir.path()), executables.clone());
    sweep.run(std::slice::from_ref(&scenario));
    assert!(!corpus_path.exists(), "corpus should be removed after the pass");

    let mut keeping = sweep_config(dir.path());
    keeping.keep_corpus = true;
    let sweep = Sweep::new(keeping, executables);
    sweep.run(std::slice::from_ref(&scenario));
    assert!(corpus_path.exists(), "corpus should be retained on request");
}

#[test]
fn test_failed_corpus_build_skips_scenario_and_sweep_continues() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_script(dir.path(), "bench_good", "wc -c < \"$1\"");
    let mut executables = BTreeMap::new();
    executables.insert("good".to_string(), good);

    let mut config = sweep_config(dir.path());
    // Point corpus output into a directory that does not exist.
    config.corpus_dir = dir.path().join("missing");

    let scenarios = vec![small_scenario("csv_mixed_100r_3c_8ch", 100, 3)];
    let report = Sweep::new(config, executables).run(&scenarios);

    assert!(report.scenarios.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].scenario.name, "csv_mixed_100r_3c_8ch");
    assert!(!report.skipped[0].error.is_empty());
    assert!(report.overall.is_empty());
}

#[test]
fn test_hung_parser_does_not_stall_other_executables() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_script(dir.path(), "bench_good", "wc -c < \"$1\"");
    let hang = write_script(dir.path(), "bench_hang", "sleep 30");

    let mut executables = BTreeMap::new();
    executables.insert("good".to_string(), good);
    executables.insert("hang".to_string(), hang);

    let mut config = sweep_config(dir.path());
    config.iterations = 1;
    config.timeout_secs = 1;

    let scenarios = vec![small_scenario("csv_mixed_100r_3c_8ch", 100, 3)];
    let report = Sweep::new(config, executables).run(&scenarios);

    let rankings = &report.scenarios[0].rankings;
    assert_eq!(rankings[0].parser, "good");
    assert!(rankings[0].outcome.is_success());

    let hang_entry = rankings.iter().find(|r| r.parser == "hang").unwrap();
    match &hang_entry.outcome {
        csvbench_report::ParserOutcome::Failed(record) => {
            assert_eq!(record.failure_kinds, vec!["timeout"]);
        }
        other => panic!("expected hang to fail, got {other:?}"),
    }
}

#[test]
fn test_report_round_trips_through_json() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_script(dir.path(), "bench_good", "wc -c < \"$1\"");
    let mut executables = BTreeMap::new();
    executables.insert("good".to_string(), good);

    let scenarios = vec![small_scenario("csv_mixed_100r_3c_8ch", 100, 3)];
    let report = Sweep::new(sweep_config(dir.path()), executables).run(&scenarios);

    let json = serde_json::to_string_pretty(&report).unwrap();
    let back: csvbench_report::Report = serde_json::from_str(&json).unwrap();
    assert_eq!(back.scenarios.len(), report.scenarios.len());
    assert_eq!(back.settings.iterations, 2);
    assert_eq!(back.scenario_summary.total_scenarios, 1);
}
