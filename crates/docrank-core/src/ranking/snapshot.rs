use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::RankingEntry;
use crate::error::Result;

/// Ranks of a previous ranking run, keyed by document path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingSnapshot {
    /// Epoch milliseconds
    pub generated_at: i64,
    pub ranks: BTreeMap<String, usize>,
}

impl RankingSnapshot {
    pub fn from_entries(entries: &[RankingEntry], generated_at: i64) -> Self {
        RankingSnapshot {
            generated_at,
            ranks: entries
                .iter()
                .map(|e| (e.document.path.clone(), e.rank))
                .collect(),
        }
    }

    pub fn rank_of(&self, path: &str) -> Option<usize> {
        self.ranks.get(path).copied()
    }

    /// Load a snapshot; `None` when none was saved yet
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// `previous rank - current rank`; positive means the document moved up
///
/// A document missing from either snapshot is unranked and reports 0.
pub fn rank_change(previous: &RankingSnapshot, current: &RankingSnapshot, path: &str) -> i64 {
    match (previous.rank_of(path), current.rank_of(path)) {
        (Some(before), Some(now)) => before as i64 - now as i64,
        _ => 0,
    }
}
