use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::MetricSet;
use crate::error::Result;

/// Value assumed for a metric a document has no entry for
pub const DEFAULT_METRIC_VALUE: f64 = 5.0;

/// Clamp a metric value into `[0, 10]`; non-finite values fall back to the default
pub fn clamp_metric_value(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 10.0)
    } else {
        DEFAULT_METRIC_VALUE
    }
}

/// Metric values and visit history of one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetrics {
    #[serde(default)]
    pub values: BTreeMap<String, f64>,
    /// Epoch milliseconds; 0 means never visited
    #[serde(default)]
    pub last_visited: i64,
    #[serde(default)]
    pub visit_count: u32,
}

impl DocumentMetrics {
    /// Fresh entry with every metric at the default value
    pub fn seeded(metrics: &MetricSet) -> Self {
        DocumentMetrics {
            values: metrics
                .iter()
                .map(|m| (m.id.clone(), DEFAULT_METRIC_VALUE))
                .collect(),
            last_visited: 0,
            visit_count: 0,
        }
    }

    /// Stored value for `id`, clamped, or the default when missing
    pub fn value(&self, id: &str) -> f64 {
        self.values
            .get(id)
            .copied()
            .map(clamp_metric_value)
            .unwrap_or(DEFAULT_METRIC_VALUE)
    }

    /// True when no metric holds a value
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Persisted `path -> DocumentMetrics` map
///
/// Entries survive untracking; they are only edited by metric removal and
/// history resets. Lookups tolerate missing entries and values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricsBook {
    entries: BTreeMap<String, DocumentMetrics>,
}

impl MetricsBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&DocumentMetrics> {
        self.entries.get(path)
    }

    /// Entry for `path`, or an empty entry (every value defaults)
    pub fn metrics_or_default(&self, path: &str) -> DocumentMetrics {
        self.entries.get(path).cloned().unwrap_or_default()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &DocumentMetrics)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Create the entry for a newly tracked document; returns false if one exists
    pub fn ensure_entry(&mut self, path: &str, metrics: &MetricSet) -> bool {
        if self.entries.contains_key(path) {
            return false;
        }
        self.entries
            .insert(path.to_string(), DocumentMetrics::seeded(metrics));
        true
    }

    /// Set one metric value (clamped); counts a visit only if it changed
    pub fn set_value(&mut self, path: &str, id: &str, value: f64) -> bool {
        let value = clamp_metric_value(value);
        let entry = self.entries.entry(path.to_string()).or_default();
        let changed = !matches!(entry.values.get(id), Some(current) if *current == value);
        if changed {
            entry.values.insert(id.to_string(), value);
            entry.visit_count = entry.visit_count.saturating_add(1);
        }
        changed
    }

    /// Record a visit timestamp without touching the visit count
    pub fn touch(&mut self, path: &str, at_millis: i64) {
        self.entries.entry(path.to_string()).or_default().last_visited = at_millis;
    }

    /// Seed a new metric with the default value on every entry
    pub fn add_metric(&mut self, id: &str) {
        for entry in self.entries.values_mut() {
            entry
                .values
                .entry(id.to_string())
                .or_insert(DEFAULT_METRIC_VALUE);
        }
    }

    /// Drop a metric's value from every entry
    pub fn remove_metric(&mut self, id: &str) {
        for entry in self.entries.values_mut() {
            entry.values.remove(id);
        }
    }

    /// Zero visit counts and timestamps, keeping every entry
    pub fn reset_history(&mut self) {
        for entry in self.entries.values_mut() {
            entry.visit_count = 0;
            entry.last_visited = 0;
        }
    }

    /// Move an entry to a new path (document renamed); returns false if absent
    pub fn rename_path(&mut self, old: &str, new: &str) -> bool {
        match self.entries.remove(old) {
            Some(entry) => {
                self.entries.insert(new.to_string(), entry);
                true
            }
            None => false,
        }
    }

    /// Load from JSON; a missing file is an empty book
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
