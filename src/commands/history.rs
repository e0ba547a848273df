//! `docrank reset-history` command

use docrank_core::error::Result;
use docrank_core::store::Workspace;
use serde_json::json;

use crate::cli::Cli;
use crate::commands::format::{output_by_format_result, print_json_status};

/// Zero visit counts and timestamps; metric values are kept
pub fn execute_reset(cli: &Cli, workspace: &mut Workspace) -> Result<()> {
    workspace.book_mut().reset_history();
    workspace.save()?;
    let documents = workspace.book().len();

    output_by_format_result!(cli.format,
        json => {
            print_json_status("reset", None, &[("documents", json!(documents))])
        },
        human => {
            println!("reset visit history for {} document(s)", documents);
        }
    )
}
