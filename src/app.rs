//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - builds the FRED client (credential gate)
//! - runs the series pipeline
//! - prints reports or launches the TUI
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, ExportArgs, ReportArgs};
use crate::data::FredClient;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `macrodash` binary.
pub fn run() -> Result<(), AppError> {
    // We want bare `macrodash` and `macrodash --smooth` to behave like
    // `macrodash tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => crate::tui::run(args),
        Command::Report(args) => handle_report(args),
        Command::Export(args) => handle_export(args),
    }
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    // The credential gate runs before any fetch.
    let client = FredClient::from_env()?;
    let config = args.view.config();
    let run = pipeline::run_dashboard(&client, &config)?;

    println!("{}", crate::report::format_report(&run, &config, args.rows));
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    let client = FredClient::from_env()?;
    let config = crate::domain::DashboardConfig {
        start_date: args.start,
        // The export never reflects display smoothing.
        smooth: false,
    };
    let run = pipeline::run_dashboard(&client, &config)?;

    crate::io::export::write_workbook(&args.out, &run)?;
    println!("Wrote {}", args.out.display());
    Ok(())
}

/// Rewrite argv so `macrodash` defaults to `macrodash tui`.
///
/// Rules:
/// - `macrodash`                      -> `macrodash tui`
/// - `macrodash --smooth ...`         -> `macrodash tui --smooth ...`
/// - `macrodash --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "report" | "export");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
