//! Priority ranking of tracked documents
//!
//! Ranking is a stable sort over scored documents: entries that compare equal
//! keep their input order, and ranks are assigned 1-based after sorting.

mod snapshot;
mod stats;

pub use snapshot::{rank_change, RankingSnapshot};
pub use stats::{analyze_ranking, PriorityHistogram, RankingStats};

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{DocrankError, Result};
use crate::metrics::{DocumentMetrics, MetricSet, MetricsBook};
use crate::priority::{PriorityBand, PriorityScorer, WeightContribution};
use crate::store::DocumentRef;

/// Field a ranking is ordered by
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Priority,
    Name,
    LastVisited,
    VisitCount,
    Modified,
    /// Value of one custom metric
    Metric(String),
}

impl FromStr for SortField {
    type Err = DocrankError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_lowercase();
        if let Some(id) = lowered.strip_prefix("metric:") {
            if id.is_empty() {
                return Err(DocrankError::invalid_value("sort field", s));
            }
            return Ok(SortField::Metric(id.to_string()));
        }
        match lowered.as_str() {
            "priority" => Ok(SortField::Priority),
            "name" => Ok(SortField::Name),
            "last-visited" | "visited" => Ok(SortField::LastVisited),
            "visit-count" | "visits" => Ok(SortField::VisitCount),
            "modified" => Ok(SortField::Modified),
            _ => Err(DocrankError::invalid_value("sort field", s)),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::Priority => write!(f, "priority"),
            SortField::Name => write!(f, "name"),
            SortField::LastVisited => write!(f, "last-visited"),
            SortField::VisitCount => write!(f, "visit-count"),
            SortField::Modified => write!(f, "modified"),
            SortField::Metric(id) => write!(f, "metric:{}", id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl FromStr for SortOrder {
    type Err = DocrankError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(DocrankError::invalid_value("sort order", s)),
        }
    }
}

/// Options for [`generate_ranking`]
#[derive(Debug, Clone, Default)]
pub struct RankingOptions {
    /// Keep at most this many entries after sorting
    pub limit: Option<usize>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    /// Keep entries whose priority is zero
    pub include_empty_metrics: bool,
    /// Attach a per-metric breakdown to every entry
    pub with_breakdown: bool,
}

/// One ranked document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub document: DocumentRef,
    pub metrics: DocumentMetrics,
    pub priority: f64,
    pub band: PriorityBand,
    /// 1-based position
    pub rank: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_breakdown: Option<Vec<WeightContribution>>,
}

/// Score, filter, sort and rank documents
#[tracing::instrument(skip_all, fields(documents = documents.len()))]
pub fn generate_ranking(
    documents: &[DocumentRef],
    book: &MetricsBook,
    metrics: &MetricSet,
    options: &RankingOptions,
) -> Vec<RankingEntry> {
    let scorer = PriorityScorer::new(metrics);

    let mut entries: Vec<RankingEntry> = documents
        .iter()
        .map(|document| {
            let snapshot = book.metrics_or_default(&document.path);
            let priority = scorer.calculate_priority(&snapshot);
            let weight_breakdown = options
                .with_breakdown
                .then(|| scorer.weight_breakdown(&snapshot));
            RankingEntry {
                document: document.clone(),
                metrics: snapshot,
                priority,
                band: PriorityBand::from_score(priority),
                rank: 0,
                weight_breakdown,
            }
        })
        .filter(|entry| options.include_empty_metrics || entry.priority > 0.0)
        .collect();

    entries.sort_by(|a, b| {
        let ordering = compare_entries(a, b, &options.sort_by);
        match options.sort_order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });

    if let Some(limit) = options.limit {
        entries.truncate(limit);
    }

    for (index, entry) in entries.iter_mut().enumerate() {
        entry.rank = index + 1;
    }

    entries
}

fn compare_entries(a: &RankingEntry, b: &RankingEntry, field: &SortField) -> Ordering {
    match field {
        SortField::Priority => a.priority.total_cmp(&b.priority),
        SortField::Name => a
            .document
            .display_name
            .to_lowercase()
            .cmp(&b.document.display_name.to_lowercase()),
        SortField::LastVisited => a.metrics.last_visited.cmp(&b.metrics.last_visited),
        SortField::VisitCount => a.metrics.visit_count.cmp(&b.metrics.visit_count),
        SortField::Modified => a.document.modify_time.cmp(&b.document.modify_time),
        SortField::Metric(id) => a.metrics.value(id).total_cmp(&b.metrics.value(id)),
    }
}
