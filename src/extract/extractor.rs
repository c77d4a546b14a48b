//! Row classification and column accumulation.
//!
//! Each input row yields exactly one `RowDiagnostic`, so the caller always has
//! a complete account of what happened to the file: which rows introduced
//! keys, which supplied values, which were ignored and which were skipped.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{Cell, RawRow, RowPolicy};

use super::error::{ExtractError, RowParseError, RowParseErrorKind};
use super::table::TrialTable;

/// Why a row was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    EmptyFirstCell,
    DateStamp,
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IgnoreReason::EmptyFirstCell => write!(f, "first cell is empty"),
            IgnoreReason::DateStamp => write!(f, "first cell is a date stamp"),
        }
    }
}

/// What happened to one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RowOutcome {
    Key { key: String },
    Value { key: String, value: i64 },
    Ignored { reason: IgnoreReason },
    Skipped { error: RowParseErrorKind },
}

/// One entry of the per-row log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowDiagnostic {
    pub line: u64,
    pub raw: Vec<String>,
    #[serde(flatten)]
    pub outcome: RowOutcome,
}

/// Per-outcome row counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowCounts {
    pub keys: usize,
    pub values: usize,
    pub ignored: usize,
    pub skipped: usize,
}

impl RowCounts {
    pub fn total(&self) -> usize {
        self.keys + self.values + self.ignored + self.skipped
    }
}

/// Extraction output: the table plus the per-row log.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub table: TrialTable,
    pub diagnostics: Vec<RowDiagnostic>,
}

impl Extraction {
    pub fn counts(&self) -> RowCounts {
        let mut counts = RowCounts::default();
        for d in &self.diagnostics {
            match d.outcome {
                RowOutcome::Key { .. } => counts.keys += 1,
                RowOutcome::Value { .. } => counts.values += 1,
                RowOutcome::Ignored { .. } => counts.ignored += 1,
                RowOutcome::Skipped { .. } => counts.skipped += 1,
            }
        }
        counts
    }

    pub fn skipped_rows(&self) -> impl Iterator<Item = &RowDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.outcome, RowOutcome::Skipped { .. }))
    }
}

/// Extract a `TrialTable` from rows in file order.
///
/// Rows that failed to read arrive as `Err` and are treated like any other
/// malformed row: skipped or fatal depending on `policy`.
pub fn extract_table<I>(rows: I, policy: RowPolicy) -> Result<Extraction, ExtractError>
where
    I: IntoIterator<Item = Result<RawRow, RowParseError>>,
{
    let mut columns: HashMap<String, Vec<i64>> = HashMap::new();
    let mut current_key: Option<String> = None;
    let mut diagnostics = Vec::new();

    for row in rows {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                diagnostics.push(reject_row(err, policy)?);
                continue;
            }
        };

        let first = Cell::new(row.cell(0));

        if first.is_empty() || first.is_date() {
            let reason = if first.is_empty() {
                IgnoreReason::EmptyFirstCell
            } else {
                IgnoreReason::DateStamp
            };
            debug!(line = row.line, raw = ?row.cells, "row ignored: {reason}");
            diagnostics.push(RowDiagnostic {
                line: row.line,
                raw: row.cells,
                outcome: RowOutcome::Ignored { reason },
            });
        } else if first.is_trial_number() {
            let Some(key) = current_key.clone() else {
                return Err(ExtractError::MissingKey {
                    line: row.line,
                    raw: row.cells,
                });
            };

            match parse_value(&row) {
                Ok(value) => {
                    columns.entry(key.clone()).or_default().push(value);
                    debug!(line = row.line, raw = ?row.cells, key = %key, value, "value extracted");
                    diagnostics.push(RowDiagnostic {
                        line: row.line,
                        raw: row.cells,
                        outcome: RowOutcome::Value { key, value },
                    });
                }
                Err(kind) => {
                    let err = RowParseError {
                        line: row.line,
                        raw: row.cells,
                        kind,
                    };
                    diagnostics.push(reject_row(err, policy)?);
                }
            }
        } else {
            let key = first.content().to_string();
            // A repeated key restarts accumulation.
            columns.insert(key.clone(), Vec::new());
            info!(line = row.line, raw = ?row.cells, key = %key, "key extracted");
            current_key = Some(key.clone());
            diagnostics.push(RowDiagnostic {
                line: row.line,
                raw: row.cells,
                outcome: RowOutcome::Key { key },
            });
        }
    }

    let table = TrialTable::from_accumulated(columns)?;

    Ok(Extraction { table, diagnostics })
}

/// Value of a trial row: `*` is zero, anything else must be an integer.
fn parse_value(row: &RawRow) -> Result<i64, RowParseErrorKind> {
    let Some(text) = row.cells.get(1) else {
        return Err(RowParseErrorKind::MissingValue);
    };

    if !Cell::new(text).is_not_a_star() {
        return Ok(0);
    }

    text.trim()
        .parse::<i64>()
        .map_err(|_| RowParseErrorKind::InvalidInteger { text: text.clone() })
}

fn reject_row(err: RowParseError, policy: RowPolicy) -> Result<RowDiagnostic, ExtractError> {
    match policy {
        RowPolicy::Abort => Err(ExtractError::RowParse(err)),
        RowPolicy::Skip => {
            warn!(line = err.line, raw = ?err.raw, "row skipped: {}", err.kind);
            Ok(RowDiagnostic {
                line: err.line,
                raw: err.raw,
                outcome: RowOutcome::Skipped { error: err.kind },
            })
        }
    }
}
