//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - built from CLI arguments
//! - passed through the pipeline without borrowing CLI state
//! - serialized into the diagnostics export

use std::path::PathBuf;

use clap::ValueEnum;
use serde::Serialize;

/// One line of tab-delimited input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number in the source file.
    pub line: u64,
    pub cells: Vec<String>,
}

impl RawRow {
    pub fn new(line: u64, cells: Vec<String>) -> Self {
        Self { line, cells }
    }

    /// Cell text at `index`, or `""` when the row is too short.
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }
}

/// What to do with a row that cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// Record the row as skipped and keep going.
    #[default]
    Skip,
    /// Fail the whole file on the first malformed row.
    Abort,
}

/// Where outputs are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirs {
    /// Converted tables (and diagnostics).
    pub tables: PathBuf,
    pub figures: PathBuf,
    pub analysis: PathBuf,
}

impl Default for OutputDirs {
    fn default() -> Self {
        Self {
            tables: PathBuf::from("new_data"),
            figures: PathBuf::from("figures"),
            analysis: PathBuf::from("analysis_results"),
        }
    }
}

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub row_policy: RowPolicy,
    pub dirs: OutputDirs,
    /// Run the RT/MT analysis after conversion.
    pub analyze: bool,
    /// Suffixes `n` selecting the `RT n` / `RT-MT n` column pairs.
    pub suffixes: Vec<u32>,
    /// Write SVG figures for each analysis.
    pub figures: bool,
    /// Print a terminal scatter for each analysis.
    pub ascii_plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    /// Write the per-row diagnostics JSON next to the table.
    pub diagnostics: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            row_policy: RowPolicy::Skip,
            dirs: OutputDirs::default(),
            analyze: true,
            suffixes: vec![1, 2],
            figures: true,
            ascii_plot: false,
            plot_width: 60,
            plot_height: 20,
            diagnostics: false,
        }
    }
}
