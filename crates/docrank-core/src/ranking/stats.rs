use serde::{Deserialize, Serialize};

use super::RankingEntry;
use crate::priority::PriorityBand;

/// Entry counts per priority band
///
/// The `minimal` band is folded into `low`, giving four buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityHistogram {
    /// [8, 10]
    pub critical: usize,
    /// [6, 8)
    pub high: usize,
    /// [4, 6)
    pub medium: usize,
    /// [0, 4)
    pub low: usize,
}

impl PriorityHistogram {
    pub fn record(&mut self, band: PriorityBand) {
        match band {
            PriorityBand::Critical => self.critical += 1,
            PriorityBand::High => self.high += 1,
            PriorityBand::Medium => self.medium += 1,
            PriorityBand::Low | PriorityBand::Minimal => self.low += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }
}

/// Aggregate view of a ranking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingStats {
    pub count: usize,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    pub histogram: PriorityHistogram,
}

/// Count, mean, extremes and band histogram; all zero for an empty ranking
pub fn analyze_ranking(entries: &[RankingEntry]) -> RankingStats {
    if entries.is_empty() {
        return RankingStats::default();
    }

    let mut histogram = PriorityHistogram::default();
    let mut sum = 0.0;
    let mut max = f64::MIN;
    let mut min = f64::MAX;

    for entry in entries {
        histogram.record(PriorityBand::from_score(entry.priority));
        sum += entry.priority;
        max = max.max(entry.priority);
        min = min.min(entry.priority);
    }

    RankingStats {
        count: entries.len(),
        mean: sum / entries.len() as f64,
        max,
        min,
        histogram,
    }
}
