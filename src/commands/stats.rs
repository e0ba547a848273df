//! `docrank stats` command

use docrank_core::error::{DocrankError, Result};
use docrank_core::format::format_score;
use docrank_core::ranking::{analyze_ranking, RankingOptions};
use docrank_core::store::Workspace;
use docrank_core::Engine;

use crate::cli::Cli;
use crate::commands::format::output_by_format_result;

pub fn execute(cli: &Cli, workspace: Workspace, include_empty: bool) -> Result<()> {
    let (store, config, book) = workspace.into_parts();
    let engine = Engine::new(store, config, book);

    let entries = engine.generate_ranking(&RankingOptions {
        include_empty_metrics: include_empty,
        ..Default::default()
    })?;
    let stats = analyze_ranking(&entries);

    output_by_format_result!(cli.format,
        json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
            Ok::<(), DocrankError>(())
        },
        human => {
            println!("documents  {}", stats.count);
            println!("mean       {}", format_score(stats.mean));
            println!("max        {}", format_score(stats.max));
            println!("min        {}", format_score(stats.min));
            println!();
            println!("critical   {}", stats.histogram.critical);
            println!("high       {}", stats.histogram.high);
            println!("medium     {}", stats.histogram.medium);
            println!("low        {}", stats.histogram.low);
        }
    )
}
