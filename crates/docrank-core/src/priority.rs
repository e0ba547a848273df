//! Weighted priority scoring over custom metrics
//!
//! `score = (Σ value·w/100) / (Σ w/100)`: the weighted mean of metric values,
//! which live in `[0, 10]` (missing values default to 5). Dividing by the
//! weight fraction keeps the score in range even when weights do not sum to
//! exactly 100.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::metrics::{DocumentMetrics, MetricSet};

/// Priority band of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityBand {
    /// [0, 2)
    Minimal,
    /// [2, 4)
    Low,
    /// [4, 6)
    Medium,
    /// [6, 8)
    High,
    /// [8, 10]
    Critical,
}

impl PriorityBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            PriorityBand::Critical
        } else if score >= 6.0 {
            PriorityBand::High
        } else if score >= 4.0 {
            PriorityBand::Medium
        } else if score >= 2.0 {
            PriorityBand::Low
        } else {
            PriorityBand::Minimal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityBand::Critical => "critical",
            PriorityBand::High => "high",
            PriorityBand::Medium => "medium",
            PriorityBand::Low => "low",
            PriorityBand::Minimal => "minimal",
        }
    }
}

impl fmt::Display for PriorityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Band of a priority score
pub fn priority_band(score: f64) -> PriorityBand {
    PriorityBand::from_score(score)
}

/// Contribution of one metric to a document's priority
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightContribution {
    pub metric_id: String,
    pub display_name: String,
    pub value: f64,
    pub weight: f64,
    /// `value * weight / 100`
    pub contribution: f64,
}

/// Scores documents against a metric set
#[derive(Debug, Clone, Copy)]
pub struct PriorityScorer<'a> {
    metrics: &'a MetricSet,
}

impl<'a> PriorityScorer<'a> {
    pub fn new(metrics: &'a MetricSet) -> Self {
        PriorityScorer { metrics }
    }

    /// Composite priority in `[0, 10]`; `0.0` when no metric carries weight
    pub fn calculate_priority(&self, document: &DocumentMetrics) -> f64 {
        let mut contribution = 0.0;
        let mut weight_fraction = 0.0;

        for metric in self.metrics.iter() {
            let weight = metric.weight.max(0.0) / 100.0;
            contribution += document.value(&metric.id) * weight;
            weight_fraction += weight;
        }

        if weight_fraction <= 0.0 {
            return 0.0;
        }

        let score = contribution / weight_fraction;
        if score.is_finite() {
            score.clamp(0.0, 10.0)
        } else {
            0.0
        }
    }

    /// Per-metric breakdown in metric order
    pub fn weight_breakdown(&self, document: &DocumentMetrics) -> Vec<WeightContribution> {
        self.metrics
            .iter()
            .map(|metric| {
                let value = document.value(&metric.id);
                WeightContribution {
                    metric_id: metric.id.clone(),
                    display_name: metric.display_name.clone(),
                    value,
                    weight: metric.weight,
                    contribution: value * metric.weight.max(0.0) / 100.0,
                }
            })
            .collect()
    }
}
