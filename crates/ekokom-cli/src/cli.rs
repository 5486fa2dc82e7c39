//! CLI argument definitions for the packaging-waste report engine.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use ekokom_ingest::Delimiter;

#[derive(Parser)]
#[command(
    name = "ekokom",
    version,
    about = "EKO-KOM packaging report - packaging mass per supplier and origin",
    long_about = "Join a shipment ledger with a supplier-origin registry, classify goods,\n\
                  and compute plastic, paper and cardboard packaging mass.\n\n\
                  Writes an XLSX workbook (or CSV files) with a domestic and a foreign view."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the packaging report from a ledger and a supplier registry.
    Report(ReportArgs),

    /// List the active goods categories and coefficients.
    Categories(CategoriesArgs),
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Shipment ledger CSV (supplier, goods type, quantity).
    #[arg(value_name = "LEDGER")]
    pub ledger: PathBuf,

    /// Supplier-origin registry CSV (supplier fragment, domestic/foreign flag).
    #[arg(value_name = "REGISTRY")]
    pub registry: PathBuf,

    /// Field delimiter of the ledger: a single character, `tab`, or `auto`.
    #[arg(long = "ledger-delimiter", value_name = "DELIM", default_value = ",")]
    pub ledger_delimiter: Delimiter,

    /// Field delimiter of the registry: a single character, `tab`, or `auto`.
    #[arg(long = "registry-delimiter", value_name = "DELIM", default_value = ";")]
    pub registry_delimiter: Delimiter,

    /// JSON engine configuration (categories, column patterns, origin markers).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Report path (default: ekokom.xlsx, or ekokom.csv with --format csv).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Report format.
    #[arg(long = "format", value_enum, default_value = "xlsx")]
    pub format: OutputFormatArg,

    /// Replace existing output files.
    #[arg(long = "force")]
    pub force: bool,

    /// Also write the loaded, joined and classified relations as JSON.
    #[arg(long = "snapshot", value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Compute and print the summary without writing any file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct CategoriesArgs {
    /// JSON engine configuration to read the category table from.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the active configuration as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
pub enum OutputFormatArg {
    Xlsx,
    Csv,
}

impl OutputFormatArg {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
