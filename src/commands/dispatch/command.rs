//! Command trait and context for dispatching commands

use std::path::PathBuf;
use std::time::Instant;

use crate::cli::Cli;
use docrank_core::error::Result;
use docrank_core::store::Workspace;

use super::trace_command;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub root: &'a PathBuf,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, root: &'a PathBuf, start: Instant) -> Self {
        Self { cli, root, start }
    }

    /// Find the workspace at or above the root directory
    pub fn discover_workspace(&self) -> Result<Workspace> {
        let workspace = Workspace::discover(self.root)?;
        trace_command!(self.cli, self.start, "discover_workspace");
        Ok(workspace)
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("docrank {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Priority ranking and reading recommendations for markdown documents.");
        println!();
        println!("Run `docrank --help` for usage information.");
        Ok(())
    }
}
