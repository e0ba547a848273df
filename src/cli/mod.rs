//! CLI argument parsing for docrank
//!
//! Global flags: --root, --format, --quiet, --verbose, --log-level, --log-json

pub mod args;
pub mod format;
pub mod metric;
pub mod output;
pub mod parse;
pub mod paths;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::RankArgs;
pub use metric::MetricCommands;
pub use output::OutputFormat;

/// Docrank - rank markdown documents by priority and suggest what to read next
#[derive(Parser, Debug)]
#[command(name = "docrank")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base directory for resolving the workspace
    #[arg(long, global = true, env = "DOCRANK_ROOT")]
    pub root: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_parser = output::output_format_parser(), default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log filter (e.g. "debug" or "docrank_core=trace")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a docrank workspace in the root directory
    Init,

    /// Start tracking markdown documents
    Track {
        /// Document paths relative to the workspace root
        #[arg(conflicts_with = "all")]
        paths: Vec<String>,

        /// Track every markdown file under the workspace root
        #[arg(long)]
        all: bool,
    },

    /// Stop tracking documents (their metric values are kept)
    Untrack {
        /// Document paths relative to the workspace root
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Manage the weighted metric set
    Metric {
        #[command(subcommand)]
        command: MetricCommands,
    },

    /// Set a metric value (0-10) on a tracked document
    Set {
        /// Tracked document path
        path: String,

        /// Metric id
        metric: String,

        /// New value between 0 and 10
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Record a visit to a tracked document
    Visit {
        /// Tracked document path
        path: String,
    },

    /// Rank tracked documents by priority
    Rank(RankArgs),

    /// Summarize the priority distribution
    Stats {
        /// Include documents whose priority is zero
        #[arg(long)]
        include_empty: bool,
    },

    /// Recommend documents to read next
    Recommend {
        /// Recommend documents similar to this one instead of the reading history
        #[arg(long, short)]
        current: Option<String>,

        /// Maximum recommendations (defaults to the configured top_k)
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Direct similarity between two tracked documents
    Similar {
        /// First document path
        a: String,

        /// Second document path
        b: String,
    },

    /// Clear visit counts and timestamps for every document
    ResetHistory,
}
