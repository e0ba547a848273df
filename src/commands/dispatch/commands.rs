//! Command implementations for all docrank commands

use crate::cli::Commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use docrank_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        dispatch_command::execute(self, ctx)
    }
}

pub(super) mod dispatch_command {
    use super::*;

    use crate::cli::{MetricCommands, RankArgs};
    use crate::commands::{history, init, metric, rank, recommend, set, similar, stats, track};

    pub(super) fn execute(cmd: &Commands, ctx: &CommandContext) -> Result<()> {
        match cmd {
            Commands::Init => init::execute(ctx.cli, ctx.root),
            Commands::Track { paths, all } => execute_track(ctx, paths, *all),
            Commands::Untrack { paths } => execute_untrack(ctx, paths),
            Commands::Metric { command } => execute_metric(ctx, command),
            Commands::Set {
                path,
                metric,
                value,
            } => execute_set(ctx, path, metric, value),
            Commands::Visit { path } => execute_visit(ctx, path),
            Commands::Rank(args) => execute_rank(ctx, args),
            Commands::Stats { include_empty } => execute_stats(ctx, *include_empty),
            Commands::Recommend { current, limit } => {
                execute_recommend(ctx, current.as_deref(), *limit)
            }
            Commands::Similar { a, b } => execute_similar(ctx, a, b),
            Commands::ResetHistory => execute_reset_history(ctx),
        }
    }

    fn execute_track(ctx: &CommandContext, paths: &[String], all: bool) -> Result<()> {
        let mut workspace = ctx.discover_workspace()?;
        track::execute_track(ctx.cli, &mut workspace, paths, all)
    }

    fn execute_untrack(ctx: &CommandContext, paths: &[String]) -> Result<()> {
        let mut workspace = ctx.discover_workspace()?;
        track::execute_untrack(ctx.cli, &mut workspace, paths)
    }

    fn execute_metric(ctx: &CommandContext, command: &MetricCommands) -> Result<()> {
        let mut workspace = ctx.discover_workspace()?;
        match command {
            MetricCommands::List => metric::execute_list(ctx.cli, &workspace),
            MetricCommands::Add { name, weight } => {
                metric::execute_add(ctx.cli, &mut workspace, name, *weight)
            }
            MetricCommands::Remove { id } => metric::execute_remove(ctx.cli, &mut workspace, id),
            MetricCommands::Rename { id, name } => {
                metric::execute_rename(ctx.cli, &mut workspace, id, name)
            }
            MetricCommands::Weight { id, weight } => {
                metric::execute_weight(ctx.cli, &mut workspace, id, *weight)
            }
        }
    }

    fn execute_set(ctx: &CommandContext, path: &str, metric: &str, value: &str) -> Result<()> {
        let mut workspace = ctx.discover_workspace()?;
        set::execute_set(ctx.cli, &mut workspace, path, metric, value)
    }

    fn execute_visit(ctx: &CommandContext, path: &str) -> Result<()> {
        let mut workspace = ctx.discover_workspace()?;
        set::execute_visit(ctx.cli, &mut workspace, path)
    }

    fn execute_rank(ctx: &CommandContext, args: &RankArgs) -> Result<()> {
        let workspace = ctx.discover_workspace()?;
        rank::execute(ctx.cli, workspace, args, ctx.start)
    }

    fn execute_stats(ctx: &CommandContext, include_empty: bool) -> Result<()> {
        let workspace = ctx.discover_workspace()?;
        stats::execute(ctx.cli, workspace, include_empty)
    }

    fn execute_recommend(
        ctx: &CommandContext,
        current: Option<&str>,
        limit: Option<usize>,
    ) -> Result<()> {
        let workspace = ctx.discover_workspace()?;
        recommend::execute(ctx.cli, workspace, current, limit, ctx.start)
    }

    fn execute_similar(ctx: &CommandContext, a: &str, b: &str) -> Result<()> {
        let workspace = ctx.discover_workspace()?;
        similar::execute(ctx.cli, workspace, a, b)
    }

    fn execute_reset_history(ctx: &CommandContext) -> Result<()> {
        let mut workspace = ctx.discover_workspace()?;
        history::execute_reset(ctx.cli, &mut workspace)
    }
}
