//! CLI argument definitions for `comps`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "comps",
    version,
    about = "Comparable property comp sets - serve the API and manage comp sets",
    long_about = "Serve the comp set HTTP API and manage comp sets on disk.\n\n\
                  Comp sets live as JSON files in the comp sets directory; the\n\
                  comparables dataset is the extraction run's output file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub storage: StorageArgs,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

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

/// Where comp sets and the comparables dataset live.
#[derive(Args, Clone)]
pub struct StorageArgs {
    /// Comp sets directory (default: $COMPS_SETS_DIR or ./comp_sets).
    #[arg(long = "comp-sets-dir", value_name = "DIR", global = true)]
    pub comp_sets_dir: Option<PathBuf>,

    /// Comparables dataset (default: $COMPS_DATA_FILE or ./output/comparables_data.json).
    #[arg(long = "data-file", value_name = "PATH", global = true)]
    pub data_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the HTTP API.
    Serve(ServeArgs),

    /// List comp sets.
    List,

    /// Show one comp set, enriched from the comparables dataset.
    Show {
        /// Comp set name.
        name: String,
    },

    /// Rewrite comp set files still stored as bare arrays.
    Migrate,

    /// Write a CSV or XLSX export to disk.
    Export(ExportArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind.
    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    /// Do not send permissive CORS headers.
    #[arg(long = "no-cors")]
    pub no_cors: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    /// What to export.
    #[arg(value_enum)]
    pub kind: ExportKind,

    /// Export this comp set instead of the whole comparables dataset.
    #[arg(long = "comp-set", value_name = "NAME")]
    pub comp_set: Option<String>,

    /// Output file (default: dated filename in the current directory).
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    /// Properties as CSV.
    Csv,
    /// Unit mix as CSV.
    UnitsCsv,
    /// Workbook with summary, properties and unit sheets.
    Xlsx,
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
