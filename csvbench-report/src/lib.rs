#![warn(missing_docs)]
//! CSVBench Report - Sweep Result Structures
//!
//! The write-once report structure produced after a benchmark sweep:
//! environment metadata, the scenario catalog summary, and an aggregate
//! or failure record for every executable×scenario pair.
//!
//! This structure is the sole handoff point to formatting and printing
//! collaborators. It is fully self-describing — rendering a report
//! requires no external lookups — and every type derives serde in both
//! directions.

mod report;

pub use report::{
    AggregateStat, FailureRecord, OverallRanking, ParserOutcome, ParserReport, Report, ReportMeta,
    ScenarioReport, SkippedScenario, SweepSettings,
};
