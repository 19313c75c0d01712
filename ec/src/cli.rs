//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// Chamber of Echoes - arithmetic progression predictor
#[derive(Parser)]
#[command(
    name = "ec",
    about = "Predict the next terms of arithmetic progressions",
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the interactive chamber (default)
    Repl,

    /// Serve the HTTP JSON API
    Serve {
        /// Interface to bind (overrides config and HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory of static web assets to serve at /
        #[arg(long, value_name = "DIR")]
        static_dir: Option<PathBuf>,
    },

    /// Predict the next terms of a comma-separated sequence
    Predict {
        /// Sequence such as "3, 6, 9, 12"
        #[arg(allow_hyphen_values = true)]
        sequence: String,

        /// Number of terms to predict
        #[arg(short = 'n', long)]
        count: Option<i64>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Run the built-in scenario checks
    Selftest,

    /// Walk through example usage of the predictor
    Demo,
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    let path = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("echochamber")
        .join("logs")
        .join("echochamber.log");
    debug!(?path, "get_log_path: returning path");
    path
}

/// Output format for one-shot commands
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
