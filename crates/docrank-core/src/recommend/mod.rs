//! Recommendation aggregation
//!
//! Two scoring modes share candidate selection and output handling:
//!
//! - corpus mode ranks candidates by TF-IDF similarity to a set of anchor
//!   documents, blended with priority, staleness and under-visit terms
//! - direct mode ranks candidates by raw term-frequency similarity to one
//!   current document, falling back to priority order when nothing matches
//!
//! Both modes work on documents whose content was already loaded; reading and
//! caching lives in [`crate::engine`].

mod anchors;
mod coalesce;
mod corpus;
mod direct;
mod exclude;

pub use anchors::select_anchors;
pub use coalesce::{Coalescer, Ticket, DEFAULT_COALESCE_WINDOW_MS};
pub use corpus::{score_corpus, CorpusWeights};
pub use direct::score_direct;
pub use exclude::ExclusionSet;

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::CachedContent;
use crate::metrics::{DocumentMetrics, MetricSet, MetricsBook};
use crate::store::DocumentRef;

/// How a recommendation's score was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationMode {
    Corpus,
    Direct,
    /// Nothing was similar; score is `priority / 10`
    PriorityFallback,
}

impl RecommendationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationMode::Corpus => "corpus",
            RecommendationMode::Direct => "direct",
            RecommendationMode::PriorityFallback => "priority_fallback",
        }
    }
}

/// One recommended document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub document: DocumentRef,
    /// In `[0, 1]`
    pub score: f64,
    pub similarity: f64,
    pub priority: f64,
    pub metrics: DocumentMetrics,
    pub mode: RecommendationMode,
}

/// A document with its extracted content, ready for scoring
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub document: DocumentRef,
    pub content: Arc<CachedContent>,
}

impl LoadedDocument {
    pub fn path(&self) -> &str {
        &self.document.path
    }

    /// True when the text is too short to compare meaningfully
    pub fn is_degenerate(&self, min_text_chars: usize) -> bool {
        self.content.char_count() < min_text_chars
    }
}

/// What a caller asks the engine for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendRequest {
    /// Rank against this document (direct mode) instead of the anchors
    pub current: Option<String>,
    /// Override the configured top-K
    pub limit: Option<usize>,
}

/// Shared inputs of both scoring modes
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub book: &'a MetricsBook,
    pub metrics: &'a MetricSet,
    pub now_millis: i64,
    pub min_text_chars: usize,
}

/// Tracked documents eligible for recommendation
///
/// Excluded paths and the current document are removed; the rest is ordered
/// most recently modified first and capped at `max_candidates`.
pub fn select_candidates(
    documents: &[DocumentRef],
    exclusions: &ExclusionSet,
    current: Option<&str>,
    max_candidates: usize,
) -> Vec<DocumentRef> {
    let mut candidates: Vec<DocumentRef> = documents
        .iter()
        .filter(|d| Some(d.path.as_str()) != current)
        .filter(|d| !exclusions.is_excluded(&d.path))
        .cloned()
        .collect();

    candidates.sort_by(|a, b| {
        b.modify_time
            .cmp(&a.modify_time)
            .then_with(|| a.path.cmp(&b.path))
    });
    candidates.truncate(max_candidates);
    candidates
}

/// Keep the best-scoring recommendation per path, ordered by score
///
/// Equal scores order by path so output is deterministic.
pub fn dedupe(recommendations: Vec<Recommendation>) -> Vec<Recommendation> {
    let mut best: HashMap<String, Recommendation> = HashMap::with_capacity(recommendations.len());
    for recommendation in recommendations {
        match best.get(&recommendation.document.path) {
            Some(existing) if existing.score >= recommendation.score => {}
            _ => {
                best.insert(recommendation.document.path.clone(), recommendation);
            }
        }
    }

    let mut unique: Vec<Recommendation> = best.into_values().collect();
    sort_by_score(&mut unique);
    unique
}

pub(crate) fn sort_by_score(recommendations: &mut [Recommendation]) {
    recommendations.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.document.path.cmp(&b.document.path))
    });
}
