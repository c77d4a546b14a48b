//! RT/MT analysis.
//!
//! For a suffix `n`, the table carries a reaction time column `RT n` and a
//! cumulative reaction+movement time column `RT-MT n`. A zero in either is a
//! missing-trial sentinel. The analysis keeps positions where both are
//! non-zero (in their original order) and derives `MT n = (RT-MT n) - (RT n)`.

pub mod stats;

pub use stats::*;

use crate::extract::TrialTable;

/// Source column holding reaction times for `suffix`.
pub fn rt_column(suffix: u32) -> String {
    format!("RT {suffix}")
}

/// Source column holding reaction + movement times for `suffix`.
pub fn rt_mt_column(suffix: u32) -> String {
    format!("RT-MT {suffix}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    MissingColumn { suffix: u32, column: String },
    /// `RT-MT n - RT n` does not fit in an `i64` at trial index `trial`.
    Overflow { suffix: u32, trial: usize },
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::MissingColumn { suffix, column } => {
                write!(f, "analysis {suffix}: column '{column}' not found")
            }
            AnalysisError::Overflow { suffix, trial } => {
                write!(f, "analysis {suffix}: MT overflows at trial {trial}")
            }
        }
    }
}

impl std::error::Error for AnalysisError {}

/// Filtered RT and derived MT for one suffix.
#[derive(Debug, Clone, PartialEq)]
pub struct RtMtAnalysis {
    pub suffix: u32,
    pub rt: Vec<i64>,
    pub mt: Vec<i64>,
    /// Positions excluded because of a zero sentinel.
    pub dropped: usize,
    pub rt_stats: Option<SeriesStats>,
    pub mt_stats: Option<SeriesStats>,
}

impl RtMtAnalysis {
    pub fn rt_name(&self) -> String {
        format!("RT{}", self.suffix)
    }

    pub fn mt_name(&self) -> String {
        format!("MT{}", self.suffix)
    }

    pub fn len(&self) -> usize {
        self.rt.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rt.is_empty()
    }

    /// `(rt, mt)` pairs for plotting.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.rt
            .iter()
            .zip(&self.mt)
            .map(|(&rt, &mt)| (rt as f64, mt as f64))
            .collect()
    }
}

/// Run the analysis for `suffix` on an extracted table.
pub fn analyze(table: &TrialTable, suffix: u32) -> Result<RtMtAnalysis, AnalysisError> {
    let rt_src = required_column(table, suffix, rt_column(suffix))?;
    let rt_mt_src = required_column(table, suffix, rt_mt_column(suffix))?;

    let mut rt = Vec::new();
    let mut mt = Vec::new();
    for (trial, (&r, &rm)) in rt_src.iter().zip(rt_mt_src).enumerate() {
        if r == 0 || rm == 0 {
            continue;
        }
        let m = rm
            .checked_sub(r)
            .ok_or(AnalysisError::Overflow { suffix, trial })?;
        rt.push(r);
        mt.push(m);
    }

    let dropped = rt_src.len() - rt.len();
    let rt_stats = SeriesStats::from_values(&rt);
    let mt_stats = SeriesStats::from_values(&mt);

    Ok(RtMtAnalysis {
        suffix,
        rt,
        mt,
        dropped,
        rt_stats,
        mt_stats,
    })
}

fn required_column(table: &TrialTable, suffix: u32, column: String) -> Result<&[i64], AnalysisError> {
    table
        .column(&column)
        .ok_or(AnalysisError::MissingColumn { suffix, column })
}
