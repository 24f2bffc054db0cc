//! CLI argument parsing for requote
//!
//! The repair itself lives in requote-core; everything here is the
//! collaborator layer around it: source/destination selection, overwrite
//! confirmation, and output formatting flags.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Format for the run summary and error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One-line human summary
    Human,
    /// JSON document with full counters
    Json,
}

/// Requote - wrap and double embedded quotes in tab-delimited files
#[derive(Parser, Debug)]
#[command(name = "requote")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File to repair, or `-` to read stdin
    pub input: PathBuf,

    /// Destination file, or `-` for stdout [default: fixed.<input-file-name>]
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing output file without confirmation
    #[arg(long, short)]
    pub force: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress per-line diagnostics and the summary
    #[arg(long, short)]
    pub quiet: bool,

    /// Debug-level logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Explicit log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}
