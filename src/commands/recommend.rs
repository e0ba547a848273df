//! `docrank recommend` command
//!
//! Without `--current` recommendations come from the reading history
//! (recently visited and most visited documents); with it, from direct
//! similarity to that one document.

use std::time::Instant;

use docrank_core::error::{DocrankError, Result};
use docrank_core::format::format_score;
use docrank_core::recommend::RecommendRequest;
use docrank_core::store::Workspace;
use docrank_core::Engine;

use crate::cli::Cli;
use crate::commands::dispatch::trace_command;
use crate::commands::format::output_by_format_result;

pub fn execute(
    cli: &Cli,
    workspace: Workspace,
    current: Option<&str>,
    limit: Option<usize>,
    start: Instant,
) -> Result<()> {
    let current = current
        .map(|path| workspace.require_tracked(path))
        .transpose()?;

    let (store, config, book) = workspace.into_parts();
    let mut engine = Engine::new(store, config, book);
    let recommendations = engine.recommend(&RecommendRequest { current, limit })?;
    trace_command!(cli, start, "recommend");

    output_by_format_result!(cli.format,
        json => {
            println!("{}", serde_json::to_string_pretty(&recommendations)?);
            Ok::<(), DocrankError>(())
        },
        human => {
            if recommendations.is_empty() && !cli.quiet {
                println!("No recommendations");
            }
            for recommendation in &recommendations {
                println!(
                    "{}  {:<17} {}",
                    format_score(recommendation.score),
                    recommendation.mode.as_str(),
                    recommendation.document.path
                );
            }
        }
    )
}
