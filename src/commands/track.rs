//! `docrank track` / `docrank untrack` commands

use docrank_core::bail_usage;
use docrank_core::error::{DocrankError, Result};
use docrank_core::store::{FsStore, Workspace};
use serde_json::json;
use tracing::debug;

use crate::cli::Cli;
use crate::commands::format::{output_by_format_result, print_json_status};

/// Track explicit paths, or every markdown file under the root with `--all`
pub fn execute_track(cli: &Cli, workspace: &mut Workspace, paths: &[String], all: bool) -> Result<()> {
    let candidates: Vec<String> = if all {
        let scan = FsStore::new(workspace.root(), Vec::<String>::new());
        scan.enumerate_markdown()
            .into_iter()
            .map(|document| document.path)
            .collect()
    } else if paths.is_empty() {
        bail_usage!("no paths given (use --all to track every markdown file)");
    } else {
        paths.to_vec()
    };

    let mut added = Vec::new();
    let mut already = Vec::new();
    for path in &candidates {
        if workspace.track(path)? {
            added.push(path.clone());
        } else {
            already.push(path.clone());
        }
    }
    workspace.save()?;
    debug!(added = added.len(), already = already.len(), "track");

    output_by_format_result!(cli.format,
        json => {
            print_json_status(
                "ok",
                None,
                &[
                    ("added", json!(added)),
                    ("already_tracked", json!(already)),
                    ("tracked_total", json!(workspace.tracked().len())),
                ],
            )
        },
        human => {
            for path in &added {
                println!("tracked {}", path);
            }
            if !cli.quiet {
                for path in &already {
                    println!("already tracked {}", path);
                }
                println!("{} document(s) tracked", workspace.tracked().len());
            }
        }
    )
}

/// Stop tracking paths; their metric values stay in the book
pub fn execute_untrack(cli: &Cli, workspace: &mut Workspace, paths: &[String]) -> Result<()> {
    let mut removed = Vec::new();
    let mut missing = Vec::new();
    for path in paths {
        if workspace.untrack(path)? {
            removed.push(path.clone());
        } else {
            missing.push(path.clone());
        }
    }
    workspace.save()?;

    output_by_format_result!(cli.format,
        json => {
            print_json_status(
                "ok",
                None,
                &[("removed", json!(removed)), ("not_tracked", json!(missing))],
            )
        },
        human => {
            for path in &removed {
                println!("untracked {}", path);
            }
            if !cli.quiet {
                for path in &missing {
                    println!("not tracked {}", path);
                }
            }
        }
    )?;

    Ok::<(), DocrankError>(())
}
