//! `docrank similar` command

use docrank_core::error::Result;
use docrank_core::format::format_score;
use docrank_core::store::Workspace;
use docrank_core::Engine;
use serde_json::json;

use crate::cli::Cli;
use crate::commands::format::{output_by_format_result, print_json_status};

/// Direct (corpus-free) similarity of two tracked documents
pub fn execute(cli: &Cli, workspace: Workspace, a: &str, b: &str) -> Result<()> {
    let a = workspace.require_tracked(a)?;
    let b = workspace.require_tracked(b)?;

    let (store, config, book) = workspace.into_parts();
    let mut engine = Engine::new(store, config, book);
    let similarity = engine.direct_similarity_between(&a, &b)?;

    output_by_format_result!(cli.format,
        json => {
            print_json_status(
                "ok",
                None,
                &[("a", json!(a)), ("b", json!(b)), ("similarity", json!(similarity))],
            )
        },
        human => {
            println!("{}", format_score(similarity));
        }
    )
}
