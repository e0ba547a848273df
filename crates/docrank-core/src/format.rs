//! Output format handling for docrank
//!
//! - human: readable, line-oriented output for terminal use
//! - json: stable, machine-readable JSON

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DocrankError;

/// Output format for docrank commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for machine consumption
    Json,
}

impl FromStr for OutputFormat {
    type Err = DocrankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(DocrankError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Format a score for human output: two decimals, no trailing noise
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

/// Format a signed rank delta: `+2`, `-1`, or `=` for no change
pub fn format_rank_change(delta: i64) -> String {
    match delta {
        0 => "=".to_string(),
        d if d > 0 => format!("+{}", d),
        d => d.to_string(),
    }
}
