//! `docrank set` and `docrank visit` commands

use docrank_core::clock::{Clock, SystemClock};
use docrank_core::error::{DocrankError, Result};
use docrank_core::format::format_score;
use docrank_core::priority::PriorityScorer;
use docrank_core::store::Workspace;
use serde_json::json;

use crate::cli::parse::parse_metric_value;
use crate::cli::Cli;
use crate::commands::format::{output_by_format_result, print_json_status};

/// Set one metric value on a tracked document and record the visit
pub fn execute_set(
    cli: &Cli,
    workspace: &mut Workspace,
    path: &str,
    metric: &str,
    raw_value: &str,
) -> Result<()> {
    let path = workspace.require_tracked(path)?;
    let metrics = workspace.metric_set();
    if !metrics.contains(metric) {
        return Err(DocrankError::not_found("metric", metric));
    }
    let value = parse_metric_value(metric, raw_value)?;

    let now = SystemClock.now_millis();
    let book = workspace.book_mut();
    let changed = book.set_value(&path, metric, value);
    book.touch(&path, now);

    let document = book.metrics_or_default(&path);
    let priority = PriorityScorer::new(&metrics).calculate_priority(&document);
    workspace.save()?;

    output_by_format_result!(cli.format,
        json => {
            print_json_status(
                if changed { "updated" } else { "unchanged" },
                None,
                &[
                    ("path", json!(path)),
                    ("metric", json!(metric)),
                    ("value", json!(value)),
                    ("priority", json!(priority)),
                    ("visit_count", json!(document.visit_count)),
                ],
            )
        },
        human => {
            if changed {
                println!("{} {} = {}", path, metric, format_score(value));
            } else {
                println!("{} {} unchanged ({})", path, metric, format_score(value));
            }
            if !cli.quiet {
                println!("priority {}", format_score(priority));
            }
        }
    )
}

/// Record a visit timestamp; the visit count is left alone
pub fn execute_visit(cli: &Cli, workspace: &mut Workspace, path: &str) -> Result<()> {
    let path = workspace.require_tracked(path)?;
    let now = SystemClock.now_millis();
    workspace.book_mut().touch(&path, now);
    workspace.save()?;

    output_by_format_result!(cli.format,
        json => {
            print_json_status("visited", None, &[("path", json!(path)), ("last_visited", json!(now))])
        },
        human => {
            if !cli.quiet {
                println!("visited {}", path);
            }
        }
    )
}
