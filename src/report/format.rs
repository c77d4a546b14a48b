//! Formatted terminal output for single files and batches.

use crate::analysis::SeriesStats;
use crate::app::pipeline::{AnalysisOutput, BatchOutput, FileOutput};

/// Format the summary of one processed file.
pub fn format_file_summary(file: &FileOutput) -> String {
    let mut out = String::new();
    let counts = file.extraction.counts();
    let table = &file.extraction.table;

    out.push_str(&format!("=== {} ===\n", file.input.display()));
    out.push_str(&format!(
        "Rows: {} | keys={} values={} ignored={} skipped={}\n",
        counts.total(),
        counts.keys,
        counts.values,
        counts.ignored,
        counts.skipped
    ));
    out.push_str(&format!(
        "Table: {} trials x {} columns -> {}\n",
        table.n_trials(),
        table.n_columns(),
        file.table_path.display()
    ));
    out.push_str(&format!("Columns: {}\n", table.column_names().join(", ")));

    for row in file.extraction.skipped_rows() {
        out.push_str(&format!("  (skipped line {}) {:?}\n", row.line, row.raw));
    }
    if let Some(path) = &file.diagnostics_path {
        out.push_str(&format!("Diagnostics: {}\n", path.display()));
    }

    for analysis in &file.analyses {
        out.push_str(&format_analysis(analysis));
    }
    for skipped in &file.skipped_analyses {
        out.push_str(&format!("  (skipped) {skipped}\n"));
    }

    out
}

/// Format one RT/MT analysis block.
pub fn format_analysis(output: &AnalysisOutput) -> String {
    let a = &output.analysis;
    let mut out = String::new();

    out.push_str(&format!(
        "\nAnalysis {}: kept={} dropped={} -> {}\n",
        a.suffix,
        a.len(),
        a.dropped,
        output.table_path.display()
    ));
    out.push_str(&format!("  {:<5} {}\n", a.rt_name(), fmt_stats(a.rt_stats.as_ref())));
    out.push_str(&format!("  {:<5} {}\n", a.mt_name(), fmt_stats(a.mt_stats.as_ref())));
    for fig in &output.figures {
        out.push_str(&format!("  figure: {}\n", fig.display()));
    }

    out
}

/// Format the end-of-batch summary.
pub fn format_batch_summary(batch: &BatchOutput) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "\nBatch: {} files | converted={} failed={} unsupported={}\n",
        batch.n_seen(),
        batch.processed.len(),
        batch.failed.len(),
        batch.unsupported.len()
    ));
    for (path, err) in &batch.failed {
        out.push_str(&format!("  (failed) {}: {}\n", path.display(), err.message()));
    }
    for path in &batch.unsupported {
        out.push_str(&format!("  (unsupported) {}\n", path.display()));
    }

    out
}

fn fmt_stats(stats: Option<&SeriesStats>) -> String {
    match stats {
        Some(s) => format!("n={} mean={:.1} min={} max={}", s.count, s.mean, s.min, s.max),
        None => "n=0".to_string(),
    }
}
