#![warn(missing_docs)]
//! CSVBench Runner
//!
//! Orchestrates repeatable throughput benchmarks of external parser
//! executables against deterministic generated corpora.
//!
//! ## Pipeline
//!
//! ```text
//! ScenarioSpace (csvbench-corpus)
//!        │ expand
//!        ▼
//!   Vec<Scenario>
//!        │ per scenario: build corpus ──▶ corpus file
//!        ▼
//! ┌──────────────────┐
//! │ BenchmarkExecutor │  one child process per iteration,
//! │                   │  timeout + SIGTERM/SIGKILL ladder
//! └────────┬──────────┘
//!          │ RunResult × iterations × executables
//!          ▼
//! ┌──────────────────┐
//! │      Sweep       │  aggregate successes, rank per scenario
//! │                  │  and overall, delete corpus
//! └────────┬─────────┘
//!          │
//!          ▼
//!       Report (csvbench-report)
//! ```
//!
//! An external executable's misbehavior — crash, hang, garbage output —
//! is an expected, recoverable class of outcome: it becomes a typed
//! [`RunFailure`], never a propagated error, and never affects sibling
//! iterations or other executables.

mod config;
mod executor;
mod metadata;
mod sweep;

pub use config::SweepConfig;
pub use executor::{BenchmarkExecutor, RunFailure, RunResult, RunSuccess};
pub use metadata::build_report_meta;
pub use sweep::Sweep;
