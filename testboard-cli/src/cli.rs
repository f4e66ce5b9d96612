//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "testboard.toml";

/// Testboard -- aggregate test results and coverage into a dashboard, badges and an index page.
///
/// Use `testboard <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "testboard", version, about, long_about = None)]
pub struct Cli {
    /// Path to the testboard.toml configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table / text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect results and coverage, write the summary and render every output.
    Generate(ReportArgs),

    /// Re-render dashboard, badges and index from an existing summary.
    Render(ReportArgs),

    /// Print the stored summary.
    Summary(ReportArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- generate / render / summary ----

/// Arguments shared by the report commands.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Override the reports root directory.
    #[arg(long)]
    pub reports_dir: Option<PathBuf>,
}

// ---- config ----

/// Manage testboard configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, report, thresholds).
        #[arg(long)]
        section: Option<String>,
    },
}
