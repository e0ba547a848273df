//! `docrank rank` command
//!
//! Rank change is always measured on the canonical ranking (priority,
//! descending, zero-priority documents included) so that `--sort-by` and
//! `--limit` never disturb the saved snapshot.

use std::time::Instant;

use docrank_core::clock::{Clock, SystemClock};
use docrank_core::error::{DocrankError, Result};
use docrank_core::format::{format_rank_change, format_score};
use docrank_core::ranking::{
    rank_change, RankingEntry, RankingOptions, RankingSnapshot, SortField,
};
use docrank_core::store::Workspace;
use docrank_core::Engine;
use serde::Serialize;

use crate::cli::{Cli, RankArgs};
use crate::commands::dispatch::trace_command_always;
use crate::commands::format::output_by_format_result;

#[derive(Serialize)]
struct RankedOutput<'a> {
    #[serde(flatten)]
    entry: &'a RankingEntry,
    /// `None` on the first run, before any snapshot exists
    rank_change: Option<i64>,
}

pub fn execute(cli: &Cli, workspace: Workspace, args: &RankArgs, start: Instant) -> Result<()> {
    if let SortField::Metric(id) = &args.sort_by {
        if !workspace.metric_set().contains(id) {
            return Err(DocrankError::not_found("metric", id));
        }
    }

    let snapshot_path = workspace.ranking_path();
    let previous = RankingSnapshot::load(&snapshot_path)?;

    let (store, config, book) = workspace.into_parts();
    let engine = Engine::new(store, config, book);

    let canonical = engine.generate_ranking(&RankingOptions {
        include_empty_metrics: true,
        ..Default::default()
    })?;
    let current = RankingSnapshot::from_entries(&canonical, SystemClock.now_millis());

    let entries = engine.generate_ranking(&RankingOptions {
        limit: args.limit,
        sort_by: args.sort_by.clone(),
        sort_order: args.order,
        include_empty_metrics: args.include_empty,
        with_breakdown: args.breakdown,
    })?;
    trace_command_always!(start, "rank");

    let output: Vec<RankedOutput> = entries
        .iter()
        .map(|entry| RankedOutput {
            entry,
            rank_change: previous
                .as_ref()
                .map(|prev| rank_change(prev, &current, &entry.document.path)),
        })
        .collect();

    current.save(&snapshot_path)?;

    output_by_format_result!(cli.format,
        json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok::<(), DocrankError>(())
        },
        human => {
            print_human(cli, &output, args.breakdown);
        }
    )
}

fn print_human(cli: &Cli, output: &[RankedOutput], breakdown: bool) {
    if output.is_empty() {
        if !cli.quiet {
            println!("No ranked documents");
        }
        return;
    }

    for ranked in output {
        let entry = ranked.entry;
        let change = ranked
            .rank_change
            .map(format_rank_change)
            .unwrap_or_else(|| "new".to_string());
        println!(
            "{:>3}. {:>5}  {:<8} {:>4}  {}",
            entry.rank,
            format_score(entry.priority),
            entry.band.as_str(),
            change,
            entry.document.path
        );

        if breakdown {
            for part in entry.weight_breakdown.iter().flatten() {
                println!(
                    "       {:<16} {:>5} x {:>6}% = {}",
                    part.display_name,
                    format_score(part.value),
                    format_score(part.weight),
                    format_score(part.contribution)
                );
            }
        }
    }
}
