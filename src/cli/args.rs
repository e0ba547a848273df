//! Argument structs for larger subcommands

use clap::Args;
use docrank_core::ranking::{SortField, SortOrder};

use super::parse::{parse_sort_field, parse_sort_order};

/// Arguments for the rank command
#[derive(Args, Debug, Clone)]
pub struct RankArgs {
    /// Show at most this many documents
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Sort key: priority, name, last-visited, visit-count, modified, or metric:<id>
    #[arg(long, short, default_value = "priority", value_parser = parse_sort_field)]
    pub sort_by: SortField,

    /// Sort order: asc or desc
    #[arg(long, default_value = "desc", value_parser = parse_sort_order)]
    pub order: SortOrder,

    /// Include documents whose priority is zero
    #[arg(long)]
    pub include_empty: bool,

    /// Show the per-metric weight breakdown
    #[arg(long)]
    pub breakdown: bool,
}
