//! Shared per-file pipeline used by every subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! read rows -> extract table -> write table -> (analyze -> write tables + figures)
//!
//! The front-end can then focus on presentation (reports, terminal plots).

use std::path::{Path, PathBuf};

use tracing::{error, info, info_span, warn};

use crate::analysis::{AnalysisError, RtMtAnalysis, analyze};
use crate::domain::RunConfig;
use crate::error::AppError;
use crate::extract::{Extraction, extract_table};
use crate::io::{
    analysis_path, diagnostics_path, ensure_dir, list_inputs, read_rows, table_path, write_diagnostics_json,
    write_table_xlsx,
};
use crate::plot::write_figures;

/// Outputs of one RT/MT analysis.
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    pub analysis: RtMtAnalysis,
    pub table_path: PathBuf,
    pub figures: Vec<PathBuf>,
}

/// All outputs of processing a single input file.
#[derive(Debug, Clone)]
pub struct FileOutput {
    pub input: PathBuf,
    pub extraction: Extraction,
    pub table_path: PathBuf,
    pub diagnostics_path: Option<PathBuf>,
    pub analyses: Vec<AnalysisOutput>,
    /// Suffixes that could not be analyzed (missing columns).
    pub skipped_analyses: Vec<AnalysisError>,
}

/// Outcome of a batch run over a data directory.
#[derive(Debug, Clone, Default)]
pub struct BatchOutput {
    pub processed: Vec<FileOutput>,
    pub failed: Vec<(PathBuf, AppError)>,
    /// Files present but not `.csv` / `.xls`.
    pub unsupported: Vec<PathBuf>,
}

impl BatchOutput {
    pub fn n_seen(&self) -> usize {
        self.processed.len() + self.failed.len() + self.unsupported.len()
    }
}

/// Convert one file and, when configured, analyze it.
pub fn process_file(input: &Path, config: &RunConfig) -> Result<FileOutput, AppError> {
    let _span = info_span!("file", path = %input.display()).entered();

    // 1) Read and extract.
    let rows = read_rows(input)?;
    let extraction = extract_table(rows, config.row_policy)
        .map_err(|e| AppError::new(3, format!("{}: {e}", input.display())))?;
    let counts = extraction.counts();
    info!(
        keys = counts.keys,
        values = counts.values,
        ignored = counts.ignored,
        skipped = counts.skipped,
        n_trials = extraction.table.n_trials(),
        "table extracted"
    );

    // 2) Write the converted table (+ diagnostics).
    ensure_dir(&config.dirs.tables)?;
    let table_path = table_path(&config.dirs.tables, input);
    write_table_xlsx(&table_path, &extraction.table.ordered_columns())?;

    let diagnostics_path = if config.diagnostics {
        let path = diagnostics_path(&config.dirs.tables, input);
        write_diagnostics_json(&path, input, config.row_policy, &extraction)?;
        Some(path)
    } else {
        None
    };

    // 3) Optional RT/MT analyses.
    let mut analyses = Vec::new();
    let mut skipped_analyses = Vec::new();
    if config.analyze {
        for &suffix in &config.suffixes {
            match analyze(&extraction.table, suffix) {
                Ok(analysis) => analyses.push(write_analysis(analysis, input, config)?),
                Err(e) => {
                    warn!("{e}; analysis skipped");
                    skipped_analyses.push(e);
                }
            }
        }
    }

    Ok(FileOutput {
        input: input.to_path_buf(),
        extraction,
        table_path,
        diagnostics_path,
        analyses,
        skipped_analyses,
    })
}

fn write_analysis(analysis: RtMtAnalysis, input: &Path, config: &RunConfig) -> Result<AnalysisOutput, AppError> {
    info!(
        suffix = analysis.suffix,
        kept = analysis.len(),
        dropped = analysis.dropped,
        "analysis computed"
    );

    ensure_dir(&config.dirs.analysis)?;
    let table_path = analysis_path(&config.dirs.analysis, input, analysis.suffix);
    let rt_name = analysis.rt_name();
    let mt_name = analysis.mt_name();
    write_table_xlsx(
        &table_path,
        &[(rt_name.as_str(), analysis.rt.as_slice()), (mt_name.as_str(), analysis.mt.as_slice())],
    )?;

    let figures = if config.figures {
        ensure_dir(&config.dirs.figures)?;
        write_figures(&analysis, input, &config.dirs.figures)?
    } else {
        Vec::new()
    };

    Ok(AnalysisOutput {
        analysis,
        table_path,
        figures,
    })
}

/// Process every supported file of `data_dir`, in name order.
///
/// A failing file is recorded and the batch moves on to the next one.
pub fn run_batch(data_dir: &Path, config: &RunConfig) -> Result<BatchOutput, AppError> {
    let (inputs, unsupported) = list_inputs(data_dir)?;
    info!(dir = %data_dir.display(), files = inputs.len(), "batch started");

    let mut out = BatchOutput {
        unsupported,
        ..BatchOutput::default()
    };

    for input in inputs {
        match process_file(&input, config) {
            Ok(file) => out.processed.push(file),
            Err(e) => {
                error!(path = %input.display(), "{e}");
                out.failed.push((input, e));
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::domain::{OutputDirs, RowPolicy};

    const RAT_FILE: &str = concat!(
        "Session\t21/07/2017 10:32:05\n",
        "RT 1\t\n",
        "t1\t300\n",
        "t2\t*\n",
        "t3\t280\n",
        "RT-MT 1\t\n",
        "t1\t650\n",
        "t2\t700\n",
        "t3\t600\n",
        "Angle\t\n",
        "t1\tbad\n",
    );

    fn config(root: &Path) -> RunConfig {
        RunConfig {
            dirs: OutputDirs {
                tables: root.join("new_data"),
                figures: root.join("figures"),
                analysis: root.join("analysis_results"),
            },
            ..RunConfig::default()
        }
    }

    #[test]
    fn process_file_writes_table_analysis_and_figures() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("rat.csv");
        fs::write(&input, RAT_FILE).unwrap();

        let out = process_file(&input, &config(dir.path())).unwrap();

        assert_eq!(out.table_path, dir.path().join("new_data/new_rat.xlsx"));
        assert!(out.table_path.exists());
        assert_eq!(out.extraction.table.column_names(), vec!["trial", "RT 1", "RT-MT 1"]);
        assert_eq!(out.extraction.counts().skipped, 1);

        assert_eq!(out.analyses.len(), 1);
        let a = &out.analyses[0].analysis;
        assert_eq!(a.rt, vec![300, 280]);
        assert_eq!(a.mt, vec![350, 320]);
        assert!(dir.path().join("analysis_results/analysis_rat_1.xlsx").exists());
        assert_eq!(out.analyses[0].figures.len(), 3);

        // Suffix 2 has no columns in this file.
        assert_eq!(out.skipped_analyses.len(), 1);
    }

    #[test]
    fn abort_policy_fails_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("rat.csv");
        fs::write(&input, RAT_FILE).unwrap();

        let cfg = RunConfig {
            row_policy: RowPolicy::Abort,
            ..config(dir.path())
        };
        let err = process_file(&input, &cfg).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(!dir.path().join("new_data/new_rat.xlsx").exists());
    }

    #[test]
    fn batch_continues_after_a_failed_file() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        fs::create_dir(&data).unwrap();
        fs::write(data.join("a_bad.csv"), "t1\t5\n").unwrap();
        fs::write(data.join("b_good.xls"), "key\nt1\t5\n").unwrap();
        fs::write(data.join("c_notes.txt"), "ignored").unwrap();

        let cfg = RunConfig {
            analyze: false,
            diagnostics: true,
            ..config(dir.path())
        };
        let out = run_batch(&data, &cfg).unwrap();

        assert_eq!(out.n_seen(), 3);
        assert_eq!(out.failed.len(), 1);
        assert_eq!(out.failed[0].0, data.join("a_bad.csv"));
        assert_eq!(out.processed.len(), 1);
        assert_eq!(out.unsupported, vec![data.join("c_notes.txt")]);
        assert!(dir.path().join("new_data/new_b_good.xlsx").exists());
        assert!(dir.path().join("new_data/diagnostics_b_good.json").exists());
    }

    #[test]
    fn missing_data_dir_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_batch(&dir.path().join("nope"), &config(dir.path())).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
