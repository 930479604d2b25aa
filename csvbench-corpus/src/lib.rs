#![warn(missing_docs)]
//! CSVBench Corpus Generation
//!
//! Generates large, deterministic, structurally-varied delimited-text
//! corpora for driving parser throughput benchmarks:
//! - A pure content engine mapping (row, column, style) to a cell string
//! - A chunk generator building contiguous row ranges into line buffers
//! - A parallel corpus builder with ordered reassembly and buffered writes
//! - A scenario catalog expanding a configuration space into named corpora
//!
//! Generation is deterministic end to end: the same scenario produces a
//! byte-identical file regardless of worker count or scheduling order.

mod builder;
mod chunk;
mod content;
mod scenario;

pub use builder::{
    CorpusBuilder, CorpusError, CorpusMeta, MIN_CHUNK_ROWS, ProgressFn, WRITE_BUFFER_SIZE,
};
pub use chunk::{ChunkResult, ChunkSpec, generate_chunk};
pub use content::{ContentStyle, UnknownStyle, generate_cell};
pub use scenario::{Scenario, ScenarioSpace, ScenarioSummary, summarize};
