//! Chunk Generation
//!
//! A chunk is a contiguous row range processed by one worker. Chunk
//! generation is pure: the resulting lines depend only on the scenario
//! and the row range, never on which worker ran it or when.

use crate::content::generate_cell;
use crate::scenario::Scenario;

/// A contiguous row range, `start_row` inclusive to `end_row` exclusive.
///
/// Ephemeral: created per dispatch and owned exclusively by the worker
/// that processes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSpec {
    /// First row of the chunk (inclusive).
    pub start_row: u64,
    /// Row after the last row of the chunk (exclusive).
    pub end_row: u64,
}

impl ChunkSpec {
    /// Number of rows in the chunk.
    pub fn rows(&self) -> u64 {
        self.end_row - self.start_row
    }
}

/// The generated lines for one chunk, keyed by its starting row for
/// ordered reassembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkResult {
    /// Starting row of the chunk this result was generated from.
    pub start_row: u64,
    /// One line per row in the chunk, without line terminators.
    pub lines: Vec<String>,
}

/// Generate the lines for one chunk of a scenario.
///
/// Per-cell rules, applied in order:
/// 1. if the scenario has an empty-cell percentage `p > 0` and
///    `(row * cols + col) % (100 / p) == 0`, the cell is empty;
/// 2. otherwise content comes from the deterministic content engine;
/// 3. if quoting is enabled and the delimiter is a comma, the cell is
///    wrapped in double quotes. Non-comma delimiters are never quoted.
///
/// No escaping of embedded delimiter or quote characters is performed;
/// the engine produces well-formed, not adversarial, content.
pub fn generate_chunk(scenario: &Scenario, spec: ChunkSpec) -> ChunkResult {
    let cols = scenario.cols;
    let delimiter = scenario.delimiter.to_string();
    let quote_cells = scenario.quoted && scenario.delimiter == ',';
    let mut lines = Vec::with_capacity(spec.rows() as usize);

    for row in spec.start_row..spec.end_row {
        let mut cells = Vec::with_capacity(cols);
        for col in 0..cols {
            let position = row * cols as u64 + col as u64;
            let cell = if scenario.empty_cell_pct > 0
                && position % (100 / scenario.empty_cell_pct) as u64 == 0
            {
                String::new()
            } else {
                let content = generate_cell(row, col, cols, scenario.style, scenario.cell_size);
                if quote_cells {
                    format!("\"{content}\"")
                } else {
                    content
                }
            };
            cells.push(cell);
        }
        lines.push(cells.join(&delimiter));
    }

    ChunkResult {
        start_row: spec.start_row,
        lines,
    }
}
