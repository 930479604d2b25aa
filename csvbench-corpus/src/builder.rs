//! Parallel Corpus Builder
//!
//! Partitions a scenario's row count into contiguous chunks, generates
//! them on a scoped worker pool, and writes the header plus every chunk's
//! lines in ascending start-row order regardless of completion order.
//!
//! ## Determinism
//!
//! Reassembly is keyed by each chunk's starting row, not by completion
//! time, so the output file is a pure function of the scenario: a
//! single-worker run and a multi-worker run produce byte-identical files.
//! With one worker (or a single chunk) generation runs synchronously in
//! the calling thread — an equivalence, not an optimization.

use crate::chunk::{ChunkResult, ChunkSpec, generate_chunk};
use crate::scenario::Scenario;
use fxhash::FxHashMap;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Write buffer capacity for corpus output.
pub const WRITE_BUFFER_SIZE: usize = 256 * 1024;

/// Minimum rows per chunk; smaller row counts are not worth dispatching.
pub const MIN_CHUNK_ROWS: u64 = 1000;

/// Error building a corpus file.
///
/// Any failure is fatal to the scenario's build: the partial output file
/// is unlinked before the error is returned, so no partial corpus is ever
/// observable as valid.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Writing the corpus file failed.
    #[error("failed to write corpus file: {0}")]
    Io(#[from] io::Error),
    /// The generation thread pool could not be created.
    #[error("failed to build generation thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Completed corpus artifact metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusMeta {
    /// Path of the generated file.
    pub path: PathBuf,
    /// Number of data rows written (the file holds `rows + 1` lines).
    pub rows: u64,
    /// Size of the file in bytes.
    pub file_size_bytes: u64,
    /// Wall-clock generation time.
    pub generation_time: Duration,
}

impl CorpusMeta {
    /// File size in MB.
    pub fn size_mb(&self) -> f64 {
        self.file_size_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// Progress callback invoked by workers as chunks complete, with
/// `(completed_chunks, total_chunks)`.
pub type ProgressFn = dyn Fn(usize, usize) + Send + Sync;

/// Builds corpus files from scenarios using a scoped worker pool.
///
/// The pool is acquired for the duration of one build and released on
/// every exit path, including failure.
pub struct CorpusBuilder {
    workers: usize,
    progress: Option<Box<ProgressFn>>,
}

impl CorpusBuilder {
    /// Create a builder that generates with up to `workers` threads.
    pub fn new(workers: usize) -> Self {
        CorpusBuilder {
            workers: workers.max(1),
            progress: None,
        }
    }

    /// Install a chunk-completion observer.
    pub fn with_progress(mut self, progress: impl Fn(usize, usize) + Send + Sync + 'static) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    /// Generate the corpus for `scenario` at `path`.
    ///
    /// On failure the partial file is removed and the error returned; the
    /// file at `path` exists only if the build succeeded completely.
    pub fn build(&self, scenario: &Scenario, path: &Path) -> Result<CorpusMeta, CorpusError> {
        let started = Instant::now();
        let chunks = split_rows(scenario.rows, self.workers);

        info!(
            scenario = %scenario.name,
            rows = scenario.rows,
            workers = self.workers,
            chunks = chunks.len(),
            "generating corpus"
        );

        let result = self
            .generate(scenario, &chunks)
            .and_then(|results| self.write_file(scenario, path, results).map_err(CorpusError::from));

        let file_size_bytes = match result {
            Ok(size) => size,
            Err(e) => {
                // Never leave a partial corpus behind.
                let _ = std::fs::remove_file(path);
                return Err(e);
            }
        };

        let generation_time = started.elapsed();
        info!(
            scenario = %scenario.name,
            size_mb = file_size_bytes as f64 / (1024.0 * 1024.0),
            secs = generation_time.as_secs_f64(),
            "corpus complete"
        );

        Ok(CorpusMeta {
            path: path.to_path_buf(),
            rows: scenario.rows,
            file_size_bytes,
            generation_time,
        })
    }

    /// Generate all chunks, keyed by starting row.
    fn generate(
        &self,
        scenario: &Scenario,
        chunks: &[ChunkSpec],
    ) -> Result<FxHashMap<u64, ChunkResult>, CorpusError> {
        if chunks.len() > 1 && self.workers > 1 {
            self.generate_parallel(scenario, chunks)
        } else {
            Ok(self.generate_sequential(scenario, chunks))
        }
    }

    fn generate_sequential(
        &self,
        scenario: &Scenario,
        chunks: &[ChunkSpec],
    ) -> FxHashMap<u64, ChunkResult> {
        let mut results = FxHashMap::default();
        for (index, &spec) in chunks.iter().enumerate() {
            let result = generate_chunk(scenario, spec);
            results.insert(result.start_row, result);
            self.report_progress(index + 1, chunks.len());
        }
        results
    }

    fn generate_parallel(
        &self,
        scenario: &Scenario,
        chunks: &[ChunkSpec],
    ) -> Result<FxHashMap<u64, ChunkResult>, CorpusError> {
        // Scoped pool: built for this corpus, dropped on every exit path.
        let pool = ThreadPoolBuilder::new().num_threads(self.workers).build()?;
        let total = chunks.len();
        let completed = AtomicUsize::new(0);

        let results = pool.install(|| {
            chunks
                .par_iter()
                .map(|&spec| {
                    let result = generate_chunk(scenario, spec);
                    let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    self.report_progress(done, total);
                    (result.start_row, result)
                })
                .collect()
        });

        Ok(results)
    }

    fn report_progress(&self, completed: usize, total: usize) {
        if let Some(progress) = &self.progress {
            progress(completed, total);
        }
    }

    /// Write the header plus all chunks in ascending start-row order.
    fn write_file(
        &self,
        scenario: &Scenario,
        path: &Path,
        chunks: FxHashMap<u64, ChunkResult>,
    ) -> io::Result<u64> {
        let mut out = BufWriter::with_capacity(WRITE_BUFFER_SIZE, File::create(path)?);
        let delimiter = scenario.delimiter.to_string();

        let header: Vec<String> = (0..scenario.cols)
            .map(|col| format!("field_{col:02}"))
            .collect();
        out.write_all(header.join(&delimiter).as_bytes())?;
        out.write_all(b"\n")?;

        let mut starts: Vec<u64> = chunks.keys().copied().collect();
        starts.sort_unstable();
        debug!(chunks = starts.len(), "writing chunks in row order");

        for start in starts {
            for line in &chunks[&start].lines {
                out.write_all(line.as_bytes())?;
                out.write_all(b"\n")?;
            }
        }

        out.flush()?;
        Ok(out.get_ref().metadata()?.len())
    }
}

/// Split `rows` into contiguous chunks of `max(MIN_CHUNK_ROWS, rows / workers)`.
fn split_rows(rows: u64, workers: usize) -> Vec<ChunkSpec> {
    let chunk_rows = MIN_CHUNK_ROWS.max(rows / workers as u64);
    let mut specs = Vec::new();
    let mut start = 0;
    while start < rows {
        let end = (start + chunk_rows).min(rows);
        specs.push(ChunkSpec {
            start_row: start,
            end_row: end,
        });
        start = end;
    }
    specs
}
