//! `docrank init` command - create a workspace
//!
//! Idempotent: an existing config is left as is.

use std::path::Path;

use crate::cli::Cli;
use crate::commands::format::output_by_format_result;
use docrank_core::error::{DocrankError, Result};
use docrank_core::store::Workspace;

/// Execute the init command
pub fn execute(cli: &Cli, root: &Path) -> Result<()> {
    let workspace = Workspace::init(root)?;

    output_by_format_result!(cli.format,
        json => {
            let output = serde_json::json!({
                "status": "ok",
                "workspace": workspace.data_dir().display().to_string(),
                "metrics": workspace.metric_set().len(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok::<(), DocrankError>(())
        },
        human => {
            println!("Initialized docrank workspace at {}", workspace.data_dir().display());
            if !cli.quiet {
                println!();
                println!("Run `docrank track --all` to start tracking markdown files.");
            }
        }
    )?;

    Ok(())
}
