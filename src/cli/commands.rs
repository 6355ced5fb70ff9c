//! CLI commands and argument parsing

use crate::output::OutputFormat;
use crate::types::LogLevel;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Cursor-driven pagination for list and describe operations
#[derive(Parser, Debug)]
#[command(name = "pagewalk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level, overridden by RUST_LOG
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default log level for the subscriber
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else {
            self.log_level.map_or(tracing::Level::INFO, Into::into)
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Invoke an operation and emit its output
    Invoke(InvokeArgs),

    /// Validate an operation definition
    Validate {
        /// Operation definition file (YAML)
        #[arg(short, long)]
        definition: PathBuf,
    },

    /// Manage saved cursors
    Cursor {
        #[command(subcommand)]
        action: CursorAction,
    },
}

impl Commands {
    /// Subcommand name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Invoke(_) => "invoke",
            Commands::Validate { .. } => "validate",
            Commands::Cursor { .. } => "cursor",
        }
    }
}

/// Arguments for `invoke`
#[derive(Args, Debug, Clone, Default)]
pub struct InvokeArgs {
    /// Operation definition file (YAML)
    #[arg(short, long)]
    pub definition: PathBuf,

    /// Request parameter; the value is parsed as JSON, else taken as a string
    #[arg(short, long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Request parameters as a JSON object
    #[arg(long)]
    pub request_json: Option<String>,

    /// Stop after this many items
    #[arg(long)]
    pub max_items: Option<u64>,

    /// Resume from a cursor returned by an earlier call (fetches one page)
    #[arg(long)]
    pub starting_token: Option<String>,

    /// Fetch a single page only
    #[arg(long)]
    pub no_auto_iteration: bool,

    /// Output selector: `*`, `^Param` or a dot path into the response
    #[arg(short, long)]
    pub select: Option<String>,

    /// Cursor state file (JSON)
    #[arg(long)]
    pub state: Option<PathBuf>,

    /// Continue from the cursor saved in the state file
    #[arg(long, requires = "state", conflicts_with = "starting_token")]
    pub resume: bool,
}

/// Saved cursor actions
#[derive(Subcommand, Debug)]
pub enum CursorAction {
    /// Print saved cursors
    Show {
        /// Cursor state file (JSON)
        #[arg(long)]
        state: PathBuf,

        /// Only this operation
        #[arg(long)]
        operation: Option<String>,
    },

    /// Remove saved cursors
    Clear {
        /// Cursor state file (JSON)
        #[arg(long)]
        state: PathBuf,

        /// Only this operation
        #[arg(long)]
        operation: Option<String>,
    },
}
