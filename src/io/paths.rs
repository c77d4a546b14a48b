//! Input discovery and output naming.
//!
//! Output names are derived from the input's base name with a fixed prefix:
//! `new_` (converted table), `analysis_` (RT/MT table), `fig_` (figures),
//! `diagnostics_` (row log).

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::AppError;

/// Extensions of files that are processed.
pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["csv", "xls"];

/// Which figure of an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureKind {
    Scatter,
    MtHistogram,
    RtHistogram,
}

impl FigureKind {
    pub const ALL: [FigureKind; 3] = [FigureKind::Scatter, FigureKind::MtHistogram, FigureKind::RtHistogram];

    pub fn file_tag(self) -> &'static str {
        match self {
            FigureKind::Scatter => "scatter",
            FigureKind::MtHistogram => "mt_hist",
            FigureKind::RtHistogram => "rt_hist",
        }
    }
}

pub fn is_supported_input(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.iter().any(|s| ext.eq_ignore_ascii_case(s)))
}

/// Base name of the input without its extension.
pub fn input_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string())
}

pub fn table_path(dir: &Path, input: &Path) -> PathBuf {
    dir.join(format!("new_{}.xlsx", input_stem(input)))
}

pub fn analysis_path(dir: &Path, input: &Path, suffix: u32) -> PathBuf {
    dir.join(format!("analysis_{}_{suffix}.xlsx", input_stem(input)))
}

pub fn figure_path(dir: &Path, input: &Path, suffix: u32, kind: FigureKind) -> PathBuf {
    dir.join(format!("fig_{}_{suffix}_{}.svg", input_stem(input), kind.file_tag()))
}

pub fn diagnostics_path(dir: &Path, input: &Path) -> PathBuf {
    dir.join(format!("diagnostics_{}.json", input_stem(input)))
}

/// Create `dir` (and parents) if absent.
pub fn ensure_dir(dir: &Path) -> Result<(), AppError> {
    fs::create_dir_all(dir)
        .map_err(|e| AppError::new(4, format!("Failed to create directory '{}': {e}", dir.display())))
}

/// Files directly inside `dir`, sorted by name.
///
/// Returns `(supported, unsupported)`; subdirectories are not descended into.
pub fn list_inputs(dir: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>), AppError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| AppError::new(2, format!("Failed to read data directory '{}': {e}", dir.display())))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| AppError::new(2, format!("Failed to list '{}': {e}", dir.display())))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    let (supported, unsupported): (Vec<_>, Vec<_>) = files.into_iter().partition(|p| is_supported_input(p));
    for path in &unsupported {
        info!(path = %path.display(), "skipping file with unsupported extension");
    }

    Ok((supported, unsupported))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_extensions() {
        assert!(is_supported_input(Path::new("data/Rat_102.csv")));
        assert!(is_supported_input(Path::new("data/Rat_102.xls")));
        assert!(is_supported_input(Path::new("data/Rat_102.CSV")));
        assert!(!is_supported_input(Path::new("data/Rat_102.xlsx")));
        assert!(!is_supported_input(Path::new("data/notes.txt")));
        assert!(!is_supported_input(Path::new("data/README")));
    }

    #[test]
    fn output_names_use_prefixes() {
        let input = Path::new("data/Rat_102_ChR2_21-07-2017.csv");
        assert_eq!(
            table_path(Path::new("new_data"), input),
            PathBuf::from("new_data/new_Rat_102_ChR2_21-07-2017.xlsx")
        );
        assert_eq!(
            analysis_path(Path::new("analysis_results"), input, 2),
            PathBuf::from("analysis_results/analysis_Rat_102_ChR2_21-07-2017_2.xlsx")
        );
        assert_eq!(
            figure_path(Path::new("figures"), input, 1, FigureKind::MtHistogram),
            PathBuf::from("figures/fig_Rat_102_ChR2_21-07-2017_1_mt_hist.svg")
        );
        assert_eq!(
            diagnostics_path(Path::new("new_data"), input),
            PathBuf::from("new_data/diagnostics_Rat_102_ChR2_21-07-2017.json")
        );
    }

    #[test]
    fn lists_sorted_and_partitions_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.xls", "a.csv", "notes.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("nested.csv")).unwrap();

        let (supported, unsupported) = list_inputs(dir.path()).unwrap();
        assert_eq!(supported, vec![dir.path().join("a.csv"), dir.path().join("b.xls")]);
        assert_eq!(unsupported, vec![dir.path().join("notes.txt")]);
    }
}
