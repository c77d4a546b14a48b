//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - initializes logging
//! - runs the per-file pipeline (single file or batch)
//! - prints reports and optional terminal plots

use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::{AnalysisArgs, AnalyzeArgs, BatchArgs, Command, CommonArgs, ConvertArgs};
use crate::domain::{OutputDirs, RunConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `trials` binary.
pub fn run() -> Result<(), AppError> {
    // Environment defaults for clap `env` fallbacks.
    dotenvy::dotenv().ok();

    // We want `trials` and `trials --row-policy abort` to behave like
    // `trials batch ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    init_logging(cli.verbose);

    match cli.command {
        Command::Convert(args) => handle_convert(args),
        Command::Analyze(args) => handle_analyze(args),
        Command::Batch(args) => handle_batch(args),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // Logs go to stderr so reports on stdout stay clean.
    let _ = fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_convert(args: ConvertArgs) -> Result<(), AppError> {
    let config = config_from_args(&args.common, None);
    let file = pipeline::process_file(&args.input, &config)?;
    println!("{}", crate::report::format_file_summary(&file));
    Ok(())
}

fn handle_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = config_from_args(&args.common, Some(&args.analysis));
    let file = pipeline::process_file(&args.input, &config)?;
    print_file(&file, &config);
    Ok(())
}

fn handle_batch(args: BatchArgs) -> Result<(), AppError> {
    let mut config = config_from_args(&args.common, Some(&args.analysis));
    config.analyze = !args.no_analysis;

    let batch = pipeline::run_batch(&args.data_dir, &config)?;
    for file in &batch.processed {
        print_file(file, &config);
    }
    println!("{}", crate::report::format_batch_summary(&batch));

    if batch.failed.is_empty() {
        info!(files = batch.processed.len(), "batch finished");
        Ok(())
    } else {
        Err(AppError::new(
            3,
            format!("{} of {} files failed.", batch.failed.len(), batch.n_seen() - batch.unsupported.len()),
        ))
    }
}

fn print_file(file: &pipeline::FileOutput, config: &RunConfig) {
    println!("{}", crate::report::format_file_summary(file));
    if config.ascii_plot {
        for output in &file.analyses {
            let plot =
                crate::plot::render_ascii_scatter(&output.analysis, config.plot_width, config.plot_height);
            println!("{plot}");
        }
    }
}

/// Build a `RunConfig` from parsed arguments.
///
/// Without analysis arguments the run only converts.
pub fn config_from_args(common: &CommonArgs, analysis: Option<&AnalysisArgs>) -> RunConfig {
    let defaults = RunConfig::default();
    let Some(analysis) = analysis else {
        return RunConfig {
            row_policy: common.row_policy,
            dirs: OutputDirs {
                tables: common.out_dir.clone(),
                ..defaults.dirs
            },
            analyze: false,
            diagnostics: common.diagnostics,
            ..defaults
        };
    };

    RunConfig {
        row_policy: common.row_policy,
        dirs: OutputDirs {
            tables: common.out_dir.clone(),
            figures: analysis.figures_dir.clone(),
            analysis: analysis.analysis_dir.clone(),
        },
        analyze: true,
        suffixes: analysis.suffixes.clone(),
        figures: !analysis.no_plots,
        ascii_plot: analysis.ascii,
        plot_width: analysis.width,
        plot_height: analysis.height,
        diagnostics: common.diagnostics,
    }
}

/// Rewrite argv so `trials` defaults to `trials batch`.
///
/// Rules:
/// - `trials`                         -> `trials batch`
/// - `trials --data-dir raw ...`      -> `trials batch --data-dir raw ...`
/// - `trials --help/--version/-h`     -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("batch".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "convert" | "analyze" | "batch");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "batch flags".
    if arg1.starts_with('-') {
        argv.insert(1, "batch".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_runs_batch() {
        assert_eq!(rewrite_args(argv(&["trials"])), argv(&["trials", "batch"]));
    }

    #[test]
    fn leading_flags_go_to_batch() {
        assert_eq!(
            rewrite_args(argv(&["trials", "--row-policy", "abort"])),
            argv(&["trials", "batch", "--row-policy", "abort"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        for args in [
            argv(&["trials", "convert", "a.csv"]),
            argv(&["trials", "--help"]),
            argv(&["trials", "-V"]),
        ] {
            assert_eq!(rewrite_args(args.clone()), args);
        }
    }

    #[test]
    fn convert_config_never_analyzes() {
        let cli = crate::cli::Cli::try_parse_from(["trials", "convert", "a.csv", "--out-dir", "out"]).unwrap();
        let Command::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        let config = config_from_args(&args.common, None);
        assert!(!config.analyze);
        assert_eq!(config.dirs.tables, std::path::PathBuf::from("out"));
    }

    #[test]
    fn analysis_flags_map_into_config() {
        let cli = crate::cli::Cli::try_parse_from([
            "trials",
            "analyze",
            "a.csv",
            "--no-plots",
            "--ascii",
            "--suffix",
            "2",
            "--diagnostics",
        ])
        .unwrap();
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        let config = config_from_args(&args.common, Some(&args.analysis));
        assert!(config.analyze);
        assert!(!config.figures);
        assert!(config.ascii_plot);
        assert!(config.diagnostics);
        assert_eq!(config.suffixes, vec![2]);
    }
}
