//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use vigil_domain::StoreType;

/// Vigil CLI - Interactive typed key-value store with a background watcher.
#[derive(Debug, Parser)]
#[command(name = "vigil")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "VIGIL_CONFIG")]
    pub config: Option<String>,

    /// Watcher poll interval in milliseconds
    #[arg(long, global = true)]
    pub poll_interval_ms: Option<u64>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the set command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetArgs {
    /// Entry type
    pub kind: StoreType,

    /// Entry key
    pub key: String,

    /// Raw value, `;`-separated for arrays
    pub value: String,
}

/// Arguments for the get command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetArgs {
    /// Entry type
    pub kind: StoreType,

    /// Entry key
    pub key: String,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
