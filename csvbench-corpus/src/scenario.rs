//! Scenario Catalog
//!
//! Expands a configuration space (row counts × column counts × cell sizes
//! × content styles, plus feature toggles) into a deduplicated list of
//! named scenarios, ordered ascending by estimated corpus size so a sweep
//! progresses from cheap to expensive.

use crate::content::ContentStyle;
use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Empty-cell percentage applied by the empty-cell variant toggle.
const EMPTY_CELL_VARIANT_PCT: u8 = 10;

/// One fully-specified corpus to generate and benchmark against.
///
/// Identity is the `name`; [`ScenarioSpace::expand`] guarantees name
/// uniqueness. Scenarios are immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Unique scenario name, e.g. `csv_mixed_100000r_10c_8ch`.
    pub name: String,
    /// Number of data rows (the header line is not counted).
    pub rows: u64,
    /// Number of columns per row.
    pub cols: usize,
    /// Character length of each generated cell.
    pub cell_size: usize,
    /// Cell content style.
    pub style: ContentStyle,
    /// Field delimiter character.
    pub delimiter: char,
    /// Wrap cells in double quotes.
    ///
    /// Only comma-delimited scenarios are ever quoted: for any other
    /// delimiter this flag is ignored during generation. Intentional,
    /// inherited behavior — the comma is the only delimiter treated as
    /// needing disambiguation.
    pub quoted: bool,
    /// Percentage of cells left empty on a deterministic schedule (0-100).
    pub empty_cell_pct: u8,
    /// File extension for the generated corpus (`csv` or `tsv`).
    pub file_extension: String,
}

impl Scenario {
    /// Estimated corpus size in bytes (`rows * cols * cell_size`), the
    /// catalog's sort key.
    pub fn estimated_bytes(&self) -> u64 {
        self.rows * self.cols as u64 * self.cell_size as u64
    }

    /// File name for the generated corpus (`<name>.<extension>`).
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.file_extension)
    }
}

/// Configuration space from which scenarios are expanded.
///
/// The presets ([`quick`](Self::quick), [`balanced`](Self::balanced),
/// [`comprehensive`](Self::comprehensive)) only narrow or widen the input
/// lists; expansion itself is identical for every preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSpace {
    /// Row counts to expand.
    pub rows: Vec<u64>,
    /// Column counts to expand.
    pub cols: Vec<usize>,
    /// Cell sizes to expand.
    pub cell_sizes: Vec<usize>,
    /// Content styles to expand.
    pub styles: Vec<ContentStyle>,
    /// Add a quoted variant per base scenario.
    pub test_quoted: bool,
    /// Add a tab-delimited variant per base scenario.
    pub test_tsv: bool,
    /// Add an empty-cell variant per base scenario.
    pub test_empty_cells: bool,
}

impl ScenarioSpace {
    fn default_rows() -> Vec<u64> {
        vec![10_000, 100_000, 1_000_000, 10_000_000]
    }

    fn default_cols() -> Vec<usize> {
        vec![5, 10, 20]
    }

    fn default_cell_sizes() -> Vec<usize> {
        vec![4, 8, 16]
    }

    fn default_styles() -> Vec<ContentStyle> {
        vec![ContentStyle::Numeric, ContentStyle::Mixed]
    }

    /// Quick preset: a single medium scenario for smoke runs.
    pub fn quick() -> Self {
        ScenarioSpace {
            rows: vec![100_000],
            cols: vec![10],
            cell_sizes: vec![8],
            styles: vec![ContentStyle::Mixed],
            test_quoted: false,
            test_tsv: false,
            test_empty_cells: false,
        }
    }

    /// Balanced preset (the default): the comprehensive lists truncated
    /// to the first 3 row counts, 4 column counts and 3 cell sizes.
    pub fn balanced() -> Self {
        let mut space = Self::comprehensive();
        space.truncate_for_balance();
        space
    }

    /// Comprehensive preset: the full default configuration space.
    pub fn comprehensive() -> Self {
        ScenarioSpace {
            rows: Self::default_rows(),
            cols: Self::default_cols(),
            cell_sizes: Self::default_cell_sizes(),
            styles: Self::default_styles(),
            test_quoted: false,
            test_tsv: false,
            test_empty_cells: false,
        }
    }

    /// Truncate the input lists for a balanced run. Lists of two or fewer
    /// entries are kept as-is.
    pub fn truncate_for_balance(&mut self) {
        if self.rows.len() > 2 {
            self.rows.truncate(3);
        }
        if self.cols.len() > 2 {
            self.cols.truncate(4);
        }
        if self.cell_sizes.len() > 2 {
            self.cell_sizes.truncate(3);
        }
    }

    /// Expand the cross product of the input lists into scenarios, with
    /// one extra variant per enabled toggle, deduplicated by name and
    /// sorted ascending by estimated byte size.
    pub fn expand(&self) -> Vec<Scenario> {
        let mut scenarios = Vec::new();

        for &rows in &self.rows {
            for &cols in &self.cols {
                for &cell_size in &self.cell_sizes {
                    for &style in &self.styles {
                        scenarios.push(Scenario {
                            name: format!("csv_{style}_{rows}r_{cols}c_{cell_size}ch"),
                            rows,
                            cols,
                            cell_size,
                            style,
                            delimiter: ',',
                            quoted: false,
                            empty_cell_pct: 0,
                            file_extension: "csv".to_string(),
                        });

                        if self.test_quoted {
                            scenarios.push(Scenario {
                                name: format!("csv_quoted_{style}_{rows}r_{cols}c_{cell_size}ch"),
                                rows,
                                cols,
                                cell_size,
                                style,
                                delimiter: ',',
                                quoted: true,
                                empty_cell_pct: 0,
                                file_extension: "csv".to_string(),
                            });
                        }

                        if self.test_tsv {
                            scenarios.push(Scenario {
                                name: format!("tsv_{style}_{rows}r_{cols}c_{cell_size}ch"),
                                rows,
                                cols,
                                cell_size,
                                style,
                                delimiter: '\t',
                                quoted: false,
                                empty_cell_pct: 0,
                                file_extension: "tsv".to_string(),
                            });
                        }

                        if self.test_empty_cells {
                            scenarios.push(Scenario {
                                name: format!("csv_empty_{style}_{rows}r_{cols}c_{cell_size}ch"),
                                rows,
                                cols,
                                cell_size,
                                style,
                                delimiter: ',',
                                quoted: false,
                                empty_cell_pct: EMPTY_CELL_VARIANT_PCT,
                                file_extension: "csv".to_string(),
                            });
                        }
                    }
                }
            }
        }

        let mut seen = FxHashSet::default();
        scenarios.retain(|s| seen.insert(s.name.clone()));
        scenarios.sort_by_key(Scenario::estimated_bytes);
        scenarios
    }
}

impl Default for ScenarioSpace {
    fn default() -> Self {
        Self::balanced()
    }
}

/// Catalog-level summary embedded in the final report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    /// Number of scenarios in the catalog.
    pub total_scenarios: usize,
    /// Rough total corpus size across all scenarios, in MB.
    pub estimated_total_mb: f64,
    /// Distinct file extensions, sorted.
    pub file_extensions: Vec<String>,
    /// Distinct content styles, sorted.
    pub styles: Vec<String>,
    /// Smallest row count in the catalog.
    pub min_rows: u64,
    /// Largest row count in the catalog.
    pub max_rows: u64,
    /// Smallest column count in the catalog.
    pub min_cols: usize,
    /// Largest column count in the catalog.
    pub max_cols: usize,
}

/// Summarize a scenario catalog.
///
/// The size estimate applies a 1.2× overhead factor over the raw
/// `rows * cols * cell_size` product to account for delimiters and line
/// terminators.
pub fn summarize(scenarios: &[Scenario]) -> ScenarioSummary {
    let estimated_total_mb = scenarios
        .iter()
        .map(|s| s.estimated_bytes() as f64 * 1.2 / (1024.0 * 1024.0))
        .sum();

    let mut file_extensions: Vec<String> = scenarios
        .iter()
        .map(|s| s.file_extension.clone())
        .collect::<FxHashSet<_>>()
        .into_iter()
        .collect();
    file_extensions.sort();

    let mut styles: Vec<String> = scenarios
        .iter()
        .map(|s| s.style.to_string())
        .collect::<FxHashSet<_>>()
        .into_iter()
        .collect();
    styles.sort();

    ScenarioSummary {
        total_scenarios: scenarios.len(),
        estimated_total_mb,
        file_extensions,
        styles,
        min_rows: scenarios.iter().map(|s| s.rows).min().unwrap_or(0),
        max_rows: scenarios.iter().map(|s| s.rows).max().unwrap_or(0),
        min_cols: scenarios.iter().map(|s| s.cols).min().unwrap_or(0),
        max_cols: scenarios.iter().map(|s| s.cols).max().unwrap_or(0),
    }
}
