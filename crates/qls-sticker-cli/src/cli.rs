use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

/// Extract stickers from PDF tables and write them back into master workbooks.
#[derive(Debug, Parser)]
#[command(name = "qls-sticker", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v: info, -vv: debug). RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Settings file to use instead of ~/.qls_sticker_settings.json
    #[arg(long, global = true, value_name = "FILE")]
    pub settings_file: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the full pipeline: extract, summarize, and update masters
    Run {
        /// Folder searched recursively for PDF files
        #[arg(long, value_name = "DIR")]
        base: Option<PathBuf>,

        #[command(flatten)]
        paths: MasterPaths,

        /// Skip PDFs whose folder names lack a section or program marker
        #[arg(long)]
        strict_paths: bool,

        /// Table detection strategy
        #[arg(long, value_enum, default_value_t = TableStrategy::Lattice)]
        strategy: TableStrategy,

        /// Remember the given paths for later runs
        #[arg(long)]
        save: bool,

        /// Output format of the run report
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },

    /// Print the stickers found in one PDF (or converted .xlsx)
    Extract {
        /// Path to a PDF or to a workbook converted by a previous run
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Table detection strategy (PDF input only)
        #[arg(long, value_enum, default_value_t = TableStrategy::Lattice)]
        strategy: TableStrategy,

        /// Output format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },

    /// Apply the sticker mapping to the master workbooks only
    Apply {
        #[command(flatten)]
        paths: MasterPaths,

        /// Remember the given paths for later runs
        #[arg(long)]
        save: bool,

        /// Output format of the report
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },

    /// Inspect or reset saved settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

/// Mapping, master and output paths shared by `run` and `apply`.
#[derive(Debug, Clone, Default, Args)]
pub struct MasterPaths {
    /// Sticker mapping workbook
    #[arg(long, value_name = "FILE")]
    pub mapping: Option<PathBuf>,

    /// Master workbook of the BX726 program
    #[arg(long, value_name = "FILE")]
    pub master_bx726: Option<PathBuf>,

    /// Master workbook of the V769 program
    #[arg(long, value_name = "FILE")]
    pub master_v769: Option<PathBuf>,

    /// Output folder for summaries, converted tables and updated masters
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,
}

/// Saved-settings actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum SettingsAction {
    /// Print the saved settings
    Show,
    /// Delete the saved settings
    Clear,
    /// Print the settings file location
    Path,
}

/// Report output format.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Table detection strategy.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TableStrategy {
    Lattice,
    Stream,
}
