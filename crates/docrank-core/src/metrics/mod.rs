//! User-defined metrics and per-document metric values
//!
//! A [`MetricSet`] is the ordered list of [`CustomMetric`]s. Its weights always
//! sum to 100: every mutation renormalizes. Ids are derived from the display
//! name and stay stable across renames.

mod book;

pub use book::{clamp_metric_value, DocumentMetrics, MetricsBook, DEFAULT_METRIC_VALUE};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::error::{DocrankError, Result};

/// Sum every metric set is normalized to
pub const TOTAL_WEIGHT: f64 = 100.0;

/// Derived `id -> weight` map, always in lockstep with a [`MetricSet`]
pub type MetricWeights = BTreeMap<String, f64>;

/// A user-defined scoring dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomMetric {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub weight: f64,
}

/// Ordered, weight-normalized list of custom metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricSet {
    metrics: Vec<CustomMetric>,
}

impl Default for MetricSet {
    fn default() -> Self {
        let mut set = MetricSet::empty();
        set.push_unnormalized("Importance", 40.0);
        set.push_unnormalized("Urgency", 30.0);
        set.push_unnormalized("Effort", 30.0);
        set
    }
}

/// Derive a metric id from its display name: `"Reading Time"` -> `"reading_time"`
pub fn metric_id_from_name(display_name: &str) -> String {
    let slug = slug::slugify(display_name).replace('-', "_");
    if slug.is_empty() {
        "metric".to_string()
    } else {
        slug
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn sanitize_weight(weight: f64) -> f64 {
    if weight.is_finite() {
        weight.clamp(0.0, TOTAL_WEIGHT)
    } else {
        0.0
    }
}

impl MetricSet {
    pub fn empty() -> Self {
        MetricSet {
            metrics: Vec::new(),
        }
    }

    /// Build a set from raw metrics, repairing ids and weights
    pub fn from_metrics(metrics: Vec<CustomMetric>) -> Self {
        let mut set = MetricSet { metrics };
        set.normalize();
        set
    }

    pub fn iter(&self) -> impl Iterator<Item = &CustomMetric> {
        self.metrics.iter()
    }

    pub fn as_slice(&self) -> &[CustomMetric] {
        &self.metrics
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CustomMetric> {
        self.metrics.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Derived weight map
    pub fn weights(&self) -> MetricWeights {
        self.metrics
            .iter()
            .map(|m| (m.id.clone(), m.weight))
            .collect()
    }

    pub fn total_weight(&self) -> f64 {
        self.metrics.iter().map(|m| m.weight).sum()
    }

    /// Add a metric and give it `weight`, scaling the others into the remainder
    ///
    /// Returns the derived id, suffixed (`_2`, `_3`, ...) if already taken.
    pub fn add(&mut self, display_name: &str, weight: f64) -> Result<String> {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(DocrankError::invalid_value("metric name", "(empty)"));
        }

        let id = self.push_unnormalized(display_name, 0.0);
        self.set_weight(&id, weight)?;
        Ok(id)
    }

    /// Remove a metric and renormalize the rest
    pub fn remove(&mut self, id: &str) -> Result<CustomMetric> {
        let index = self
            .metrics
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| DocrankError::not_found("metric", id))?;
        let removed = self.metrics.remove(index);
        self.renormalize();
        Ok(removed)
    }

    /// Change the display name; the id is kept
    pub fn rename(&mut self, id: &str, display_name: &str) -> Result<()> {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(DocrankError::invalid_value("metric name", "(empty)"));
        }
        let metric = self
            .metrics
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| DocrankError::not_found("metric", id))?;
        metric.display_name = display_name.to_string();
        Ok(())
    }

    /// Pin one metric's weight and scale the others proportionally into the remainder
    pub fn set_weight(&mut self, id: &str, weight: f64) -> Result<()> {
        let index = self
            .metrics
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| DocrankError::not_found("metric", id))?;

        let weight = sanitize_weight(weight);
        let others = self.metrics.len() - 1;
        if others == 0 {
            self.metrics[index].weight = TOTAL_WEIGHT;
            return Ok(());
        }

        let remainder = TOTAL_WEIGHT - weight;
        let others_total: f64 = self
            .metrics
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, m)| m.weight)
            .sum();

        for (i, metric) in self.metrics.iter_mut().enumerate() {
            if i == index {
                metric.weight = weight;
            } else if others_total > 0.0 {
                metric.weight = metric.weight / others_total * remainder;
            } else {
                metric.weight = remainder / others as f64;
            }
        }

        self.renormalize();
        Ok(())
    }

    /// Repair duplicate or empty ids, then renormalize weights
    pub fn normalize(&mut self) {
        let mut seen = HashSet::new();
        for metric in &mut self.metrics {
            let base = if metric.id.trim().is_empty() {
                metric_id_from_name(&metric.display_name)
            } else {
                metric.id.trim().to_string()
            };
            metric.id = unique_id(&base, &seen);
            seen.insert(metric.id.clone());
        }
        self.renormalize();
    }

    /// Scale weights so they sum to exactly 100
    ///
    /// Weights are rounded to two decimals and the rounding residue goes to the
    /// largest weight. An all-zero set is split evenly.
    pub fn renormalize(&mut self) {
        if self.metrics.is_empty() {
            return;
        }

        for metric in &mut self.metrics {
            metric.weight = sanitize_weight(metric.weight);
        }

        let total = self.total_weight();
        if total > 0.0 {
            for metric in &mut self.metrics {
                metric.weight = round2(metric.weight * TOTAL_WEIGHT / total);
            }
        } else {
            let even = round2(TOTAL_WEIGHT / self.metrics.len() as f64);
            for metric in &mut self.metrics {
                metric.weight = even;
            }
        }

        let residue = round2(TOTAL_WEIGHT - self.total_weight());
        if residue != 0.0 {
            let largest = self
                .metrics
                .iter()
                .enumerate()
                .max_by(|(ia, a), (ib, b)| a.weight.total_cmp(&b.weight).then(ib.cmp(ia)))
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.metrics[largest].weight = round2(self.metrics[largest].weight + residue);
        }
    }

    fn push_unnormalized(&mut self, display_name: &str, weight: f64) -> String {
        let taken: HashSet<String> = self.metrics.iter().map(|m| m.id.clone()).collect();
        let id = unique_id(&metric_id_from_name(display_name), &taken);
        self.metrics.push(CustomMetric {
            id: id.clone(),
            display_name: display_name.to_string(),
            weight,
        });
        id
    }
}

fn unique_id(base: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{}_{}", base, n))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_sums_to_100(set: &MetricSet) {
        assert!(
            (set.total_weight() - 100.0).abs() < 1e-9,
            "weights sum to {}",
            set.total_weight()
        );
    }

    #[test]
    fn test_default_set() {
        let set = MetricSet::default();
        let ids: Vec<_> = set.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["importance", "urgency", "effort"]);
        assert_sums_to_100(&set);
    }

    #[test]
    fn test_id_derivation() {
        assert_eq!(metric_id_from_name("Reading Time"), "reading_time");
        assert_eq!(metric_id_from_name("  Focus!  "), "focus");
        assert_eq!(metric_id_from_name("!!!"), "metric");
    }

    #[test]
    fn test_add_keeps_ids_unique() {
        let mut set = MetricSet::empty();
        let first = set.add("Focus", 50.0).unwrap();
        let second = set.add("focus", 50.0).unwrap();
        assert_eq!(first, "focus");
        assert_eq!(second, "focus_2");
        assert_sums_to_100(&set);
    }

    #[test]
    fn test_add_single_metric_takes_all_weight() {
        let mut set = MetricSet::empty();
        set.add("Importance", 30.0).unwrap();
        assert_eq!(set.get("importance").unwrap().weight, 100.0);
    }

    #[test]
    fn test_add_scales_existing_weights() {
        let mut set = MetricSet::empty();
        set.add("A", 100.0).unwrap();
        set.add("B", 25.0).unwrap();
        assert_eq!(set.get("a").unwrap().weight, 75.0);
        assert_eq!(set.get("b").unwrap().weight, 25.0);
    }

    #[test]
    fn test_add_rejects_empty_name() {
        let mut set = MetricSet::empty();
        assert!(set.add("   ", 10.0).is_err());
    }

    #[test]
    fn test_remove_renormalizes() {
        let mut set = MetricSet::default();
        set.remove("importance").unwrap();
        assert_eq!(set.get("urgency").unwrap().weight, 50.0);
        assert_eq!(set.get("effort").unwrap().weight, 50.0);
        assert!(set.remove("importance").is_err());
    }

    #[test]
    fn test_set_weight_redistributes_proportionally() {
        let mut set = MetricSet::default();
        set.set_weight("importance", 70.0).unwrap();
        assert_eq!(set.get("importance").unwrap().weight, 70.0);
        assert_eq!(set.get("urgency").unwrap().weight, 15.0);
        assert_eq!(set.get("effort").unwrap().weight, 15.0);
        assert_sums_to_100(&set);
    }

    #[test]
    fn test_set_weight_clamps() {
        let mut set = MetricSet::default();
        set.set_weight("urgency", 250.0).unwrap();
        assert_eq!(set.get("urgency").unwrap().weight, 100.0);
        assert_eq!(set.get("importance").unwrap().weight, 0.0);
        assert_sums_to_100(&set);
    }

    #[test]
    fn test_set_weight_from_zero_others_splits_evenly() {
        let mut set = MetricSet::default();
        set.set_weight("effort", 100.0).unwrap();
        set.set_weight("effort", 40.0).unwrap();
        assert_eq!(set.get("importance").unwrap().weight, 30.0);
        assert_eq!(set.get("urgency").unwrap().weight, 30.0);
    }

    #[test]
    fn test_renormalize_rounding_residue() {
        let mut set = MetricSet::from_metrics(vec![
            CustomMetric {
                id: "a".into(),
                display_name: "A".into(),
                weight: 1.0,
            },
            CustomMetric {
                id: "b".into(),
                display_name: "B".into(),
                weight: 1.0,
            },
            CustomMetric {
                id: "c".into(),
                display_name: "C".into(),
                weight: 1.0,
            },
        ]);
        assert_sums_to_100(&set);
        set.renormalize();
        assert_sums_to_100(&set);
        assert_eq!(set.get("a").unwrap().weight, 33.34);
    }

    #[test]
    fn test_renormalize_all_zero_splits_evenly() {
        let set = MetricSet::from_metrics(vec![
            CustomMetric {
                id: "a".into(),
                display_name: "A".into(),
                weight: 0.0,
            },
            CustomMetric {
                id: "b".into(),
                display_name: "B".into(),
                weight: f64::NAN,
            },
        ]);
        assert_eq!(set.get("a").unwrap().weight, 50.0);
        assert_eq!(set.get("b").unwrap().weight, 50.0);
    }

    #[test]
    fn test_normalize_repairs_duplicate_ids() {
        let set = MetricSet::from_metrics(vec![
            CustomMetric {
                id: "x".into(),
                display_name: "X".into(),
                weight: 50.0,
            },
            CustomMetric {
                id: "x".into(),
                display_name: "X again".into(),
                weight: 50.0,
            },
            CustomMetric {
                id: "".into(),
                display_name: "Deep Work".into(),
                weight: 0.0,
            },
        ]);
        let ids: Vec<_> = set.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "x_2", "deep_work"]);
    }

    #[test]
    fn test_rename_keeps_id() {
        let mut set = MetricSet::default();
        set.rename("urgency", "Deadline Pressure").unwrap();
        let metric = set.get("urgency").unwrap();
        assert_eq!(metric.display_name, "Deadline Pressure");
        assert!(set.rename("missing", "X").is_err());
    }

    #[test]
    fn test_weights_map_tracks_list() {
        let mut set = MetricSet::default();
        set.remove("effort").unwrap();
        let weights = set.weights();
        assert_eq!(weights.len(), 2);
        assert_eq!(weights.get("importance"), Some(&57.14));
        assert_eq!(weights.get("urgency"), Some(&42.86));
    }

    #[test]
    fn test_serde_is_a_plain_list() {
        let set = MetricSet::default();
        let json = serde_json::to_value(&set).unwrap();
        assert!(json.is_array());
        let back: MetricSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, set);
    }
}
