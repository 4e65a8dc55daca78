//! Command-line parsing for the FRED-based macro dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the pipeline code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::domain::DashboardConfig;
use crate::io::export::EXPORT_FILE_NAME;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "macrodash",
    version,
    about = "Macro dashboard (FRED-based): CPI YoY, unemployment, 10Y real yield"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive TUI dashboard.
    Tui(ViewArgs),
    /// Print the KPI row and the tail of the monthly panel.
    Report(ReportArgs),
    /// Write the four-sheet spreadsheet export and exit.
    Export(ExportArgs),
}

/// Options shared by every front-end.
#[derive(Debug, Parser, Clone)]
pub struct ViewArgs {
    /// Observation start date (YYYY-MM-DD).
    #[arg(long, default_value = "2000-01-01")]
    pub start: NaiveDate,

    /// Apply a trailing 3-month moving average (display only; never exported).
    #[arg(long)]
    pub smooth: bool,
}

impl ViewArgs {
    pub fn config(&self) -> DashboardConfig {
        DashboardConfig {
            start_date: self.start,
            smooth: self.smooth,
        }
    }
}

#[derive(Debug, Parser)]
pub struct ReportArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Number of trailing panel rows to print.
    #[arg(long, default_value_t = 12)]
    pub rows: usize,
}

#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// Observation start date (YYYY-MM-DD).
    #[arg(long, default_value = "2000-01-01")]
    pub start: NaiveDate,

    /// Output path for the workbook.
    #[arg(long, default_value = EXPORT_FILE_NAME)]
    pub out: PathBuf,
}
