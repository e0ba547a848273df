use tracing::debug;

use super::{sort_by_score, LoadedDocument, Recommendation, RecommendationMode, ScoringContext};
use crate::priority::PriorityScorer;
use crate::similarity::SimilarityEngine;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Blend of the four corpus-mode terms
///
/// ```text
/// score = similarity·avg_sim
///       + priority·(priority / priority_divisor)
///       + staleness·min(days_since_visit / staleness_days, 1)
///       + novelty·max(0, 1 - visit_count·visit_decay)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorpusWeights {
    pub similarity: f64,
    pub priority: f64,
    pub staleness: f64,
    pub novelty: f64,
    pub priority_divisor: f64,
    pub staleness_days: f64,
    pub visit_decay: f64,
}

impl Default for CorpusWeights {
    fn default() -> Self {
        CorpusWeights {
            similarity: 0.4,
            priority: 0.3,
            staleness: 0.2,
            novelty: 0.1,
            priority_divisor: 50.0,
            staleness_days: 30.0,
            visit_decay: 0.1,
        }
    }
}

impl CorpusWeights {
    /// Composite score of one candidate
    pub fn combine(&self, similarity: f64, priority: f64, days_since_visit: f64, visit_count: u32) -> f64 {
        let staleness = (days_since_visit / self.staleness_days).clamp(0.0, 1.0);
        let novelty = (1.0 - f64::from(visit_count) * self.visit_decay).max(0.0);
        let score = self.similarity * similarity
            + self.priority * (priority / self.priority_divisor)
            + self.staleness * staleness
            + self.novelty * novelty;
        if score.is_finite() {
            score.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Days since `last_visited`; a document never visited is infinitely stale
fn days_since(last_visited: i64, now_millis: i64) -> f64 {
    if last_visited <= 0 {
        return f64::INFINITY;
    }
    (now_millis - last_visited).max(0) as f64 / MILLIS_PER_DAY
}

/// Score every candidate against the anchors of a prebuilt corpus
///
/// `engine` must hold vectors for the candidates and anchors. Candidates with
/// too little text get similarity 0 but are still scored on the other terms.
/// When every candidate is that short, they are ranked by priority instead
/// with `score = priority / 10`.
pub fn score_corpus(
    engine: &SimilarityEngine,
    candidates: &[LoadedDocument],
    anchors: &[String],
    context: &ScoringContext<'_>,
    weights: &CorpusWeights,
) -> Vec<Recommendation> {
    let scorer = PriorityScorer::new(context.metrics);
    let fallback = !candidates.is_empty()
        && candidates
            .iter()
            .all(|candidate| candidate.is_degenerate(context.min_text_chars));
    if fallback {
        debug!(candidates = candidates.len(), "all candidates too short, ranking by priority");
    }

    let mut recommendations: Vec<Recommendation> = candidates
        .iter()
        .map(|candidate| {
            let metrics = context.book.metrics_or_default(candidate.path());
            let priority = scorer.calculate_priority(&metrics);

            let (score, similarity, mode) = if fallback {
                (priority / 10.0, 0.0, RecommendationMode::PriorityFallback)
            } else {
                let similarity = if candidate.is_degenerate(context.min_text_chars) {
                    0.0
                } else {
                    engine.average_anchor_similarity(candidate.path(), anchors)
                };
                let score = weights.combine(
                    similarity,
                    priority,
                    days_since(metrics.last_visited, context.now_millis),
                    metrics.visit_count,
                );
                (score, similarity, RecommendationMode::Corpus)
            };

            Recommendation {
                document: candidate.document.clone(),
                score,
                similarity,
                priority,
                metrics,
                mode,
            }
        })
        .collect();

    sort_by_score(&mut recommendations);
    recommendations
}
