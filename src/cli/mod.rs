//! Command-line parsing for the trial table converter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the extraction/analysis code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::RowPolicy;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "trials", version, about = "Trial data to spreadsheet converter with RT/MT analysis")]
pub struct Cli {
    /// Log at debug level (every row is reported).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert one tab-delimited file to an `.xlsx` table.
    Convert(ConvertArgs),
    /// Convert one file, then run the RT/MT analysis and draw figures.
    Analyze(AnalyzeArgs),
    /// Convert and analyze every `.csv` / `.xls` file of the data directory.
    Batch(BatchArgs),
}

/// Options shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct CommonArgs {
    /// What to do with malformed rows.
    #[arg(long, value_enum, env = "TRIALS_ROW_POLICY", default_value_t = RowPolicy::Skip)]
    pub row_policy: RowPolicy,

    /// Directory for converted tables.
    #[arg(long, env = "TRIALS_OUT_DIR", default_value = "new_data")]
    pub out_dir: PathBuf,

    /// Write the per-row diagnostics JSON next to each converted table.
    #[arg(long)]
    pub diagnostics: bool,
}

/// Options controlling the RT/MT analysis.
#[derive(Debug, Args, Clone)]
pub struct AnalysisArgs {
    /// Column pair suffix to analyze (`RT n` / `RT-MT n`); repeatable.
    #[arg(long = "suffix", value_name = "N", default_values_t = [1u32, 2])]
    pub suffixes: Vec<u32>,

    /// Directory for analysis tables.
    #[arg(long, env = "TRIALS_ANALYSIS_DIR", default_value = "analysis_results")]
    pub analysis_dir: PathBuf,

    /// Directory for SVG figures.
    #[arg(long, env = "TRIALS_FIGURES_DIR", default_value = "figures")]
    pub figures_dir: PathBuf,

    /// Skip SVG figures.
    #[arg(long)]
    pub no_plots: bool,

    /// Print an ASCII scatter of MT vs RT for each analysis.
    #[arg(long)]
    pub ascii: bool,

    /// ASCII plot width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// ASCII plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Tab-delimited input file.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Tab-delimited input file.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Directory holding the input files.
    #[arg(long, env = "TRIALS_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Only convert; skip the RT/MT analysis.
    #[arg(long)]
    pub no_analysis: bool,

    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn analyze_defaults() {
        let cli = Cli::try_parse_from(["trials", "analyze", "data/rat.csv"]).unwrap();
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.input, PathBuf::from("data/rat.csv"));
        assert_eq!(args.analysis.suffixes, vec![1, 2]);
        assert!(!args.analysis.no_plots);
    }

    #[test]
    fn repeated_suffix_and_policy() {
        let cli = Cli::try_parse_from([
            "trials",
            "batch",
            "--suffix",
            "3",
            "--suffix",
            "4",
            "--row-policy",
            "abort",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Command::Batch(args) = cli.command else {
            panic!("expected batch");
        };
        assert_eq!(args.analysis.suffixes, vec![3, 4]);
        assert_eq!(args.common.row_policy, RowPolicy::Abort);
    }
}
