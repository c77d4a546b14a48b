//! Write the per-row extraction log as JSON.
//!
//! The file records, for one input:
//! - the row policy in effect
//! - the resulting table shape (`n_trials`, columns in output order)
//! - one entry per input row (line, raw cells, outcome)

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::domain::RowPolicy;
use crate::error::AppError;
use crate::extract::{Extraction, RowDiagnostic};

#[derive(Debug, Serialize)]
pub struct DiagnosticsFile<'a> {
    pub tool: &'static str,
    pub input: String,
    pub row_policy: RowPolicy,
    pub n_trials: usize,
    pub columns: Vec<&'a str>,
    pub rows: &'a [RowDiagnostic],
}

impl<'a> DiagnosticsFile<'a> {
    pub fn new(input: &Path, row_policy: RowPolicy, extraction: &'a Extraction) -> Self {
        Self {
            tool: "trials",
            input: input.display().to_string(),
            row_policy,
            n_trials: extraction.table.n_trials(),
            columns: extraction.table.column_names(),
            rows: &extraction.diagnostics,
        }
    }
}

pub fn write_diagnostics_json(
    path: &Path,
    input: &Path,
    row_policy: RowPolicy,
    extraction: &Extraction,
) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create diagnostics JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &DiagnosticsFile::new(input, row_policy, extraction))
        .map_err(|e| AppError::new(4, format!("Failed to write diagnostics JSON: {e}")))?;

    Ok(())
}
