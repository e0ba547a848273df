//! `docrank metric` subcommands
//!
//! Every change rewrites the metric set in the config and keeps the metrics
//! book in step: new metrics are seeded on every document, removed ones are
//! dropped from every document.

use docrank_core::error::{DocrankError, Result};
use docrank_core::format::format_score;
use docrank_core::metrics::{MetricSet, TOTAL_WEIGHT};
use docrank_core::store::Workspace;
use docrank_core::{bail_invalid, bail_usage};
use serde_json::json;

use crate::cli::Cli;
use crate::commands::format::{output_by_format_result, print_json_status};

/// List metrics in order with their weights
pub fn execute_list(cli: &Cli, workspace: &Workspace) -> Result<()> {
    let metrics = workspace.metric_set();

    output_by_format_result!(cli.format,
        json => {
            println!("{}", serde_json::to_string_pretty(&metrics)?);
            Ok::<(), DocrankError>(())
        },
        human => {
            print_metric_table(&metrics);
        }
    )
}

/// Add a metric; without an explicit weight it gets an equal share
pub fn execute_add(
    cli: &Cli,
    workspace: &mut Workspace,
    name: &str,
    weight: Option<f64>,
) -> Result<()> {
    let mut metrics = workspace.metric_set();
    let weight = match weight {
        Some(weight) => validate_weight(weight)?,
        None => TOTAL_WEIGHT / (metrics.len() + 1) as f64,
    };

    let id = metrics.add(name, weight)?;
    let (config, book) = workspace.parts_mut();
    config.set_metric_set(&metrics);
    book.add_metric(&id);
    workspace.save()?;

    report(cli, "added", &id, &metrics)
}

pub fn execute_remove(cli: &Cli, workspace: &mut Workspace, id: &str) -> Result<()> {
    let mut metrics = workspace.metric_set();
    if metrics.len() == 1 && metrics.contains(id) {
        bail_usage!("cannot remove the last metric");
    }

    metrics.remove(id)?;
    let (config, book) = workspace.parts_mut();
    config.set_metric_set(&metrics);
    book.remove_metric(id);
    workspace.save()?;

    report(cli, "removed", id, &metrics)
}

pub fn execute_rename(cli: &Cli, workspace: &mut Workspace, id: &str, name: &str) -> Result<()> {
    let mut metrics = workspace.metric_set();
    metrics.rename(id, name)?;
    workspace.config_mut().set_metric_set(&metrics);
    workspace.save()?;

    report(cli, "renamed", id, &metrics)
}

pub fn execute_weight(cli: &Cli, workspace: &mut Workspace, id: &str, weight: f64) -> Result<()> {
    let weight = validate_weight(weight)?;
    let mut metrics = workspace.metric_set();
    metrics.set_weight(id, weight)?;
    workspace.config_mut().set_metric_set(&metrics);
    workspace.save()?;

    report(cli, "reweighted", id, &metrics)
}

fn validate_weight(weight: f64) -> Result<f64> {
    if !weight.is_finite() || !(0.0..=TOTAL_WEIGHT).contains(&weight) {
        bail_invalid!("metric weight (0-100)", weight);
    }
    Ok(weight)
}

fn report(cli: &Cli, status: &str, id: &str, metrics: &MetricSet) -> Result<()> {
    output_by_format_result!(cli.format,
        json => {
            print_json_status(status, None, &[("id", json!(id)), ("metrics", json!(metrics))])
        },
        human => {
            println!("{} {}", status, id);
            if !cli.quiet {
                print_metric_table(metrics);
            }
        }
    )
}

fn print_metric_table(metrics: &MetricSet) {
    let width = metrics.iter().map(|m| m.id.len()).max().unwrap_or(0);
    for metric in metrics.iter() {
        println!(
            "{:<width$}  {:>6}  {}",
            metric.id,
            format_score(metric.weight),
            metric.display_name,
            width = width
        );
    }
}
