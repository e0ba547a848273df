use tracing::debug;

use super::{sort_by_score, LoadedDocument, Recommendation, RecommendationMode, ScoringContext};
use crate::priority::PriorityScorer;
use crate::similarity::direct_similarity_tokens;

/// Rank candidates by raw term-frequency similarity to `current`
///
/// No corpus vocabulary is built. If `current` has too little text, or no
/// candidate shares a term with it, candidates are ranked by priority instead
/// with `score = priority / 10`.
pub fn score_direct(
    current: &LoadedDocument,
    candidates: &[LoadedDocument],
    context: &ScoringContext<'_>,
) -> Vec<Recommendation> {
    let scorer = PriorityScorer::new(context.metrics);
    let current_degenerate = current.is_degenerate(context.min_text_chars);

    let scored: Vec<(f64, f64, &LoadedDocument)> = candidates
        .iter()
        .map(|candidate| {
            let similarity = if current_degenerate || candidate.is_degenerate(context.min_text_chars) {
                0.0
            } else {
                direct_similarity_tokens(&current.content.tokens, &candidate.content.tokens)
            };
            let priority =
                scorer.calculate_priority(&context.book.metrics_or_default(candidate.path()));
            (similarity, priority, candidate)
        })
        .collect();

    let fallback = scored.iter().all(|(similarity, _, _)| *similarity <= 0.0);
    if fallback && !scored.is_empty() {
        debug!(current = %current.path(), "no similar candidates, ranking by priority");
    }

    let mut recommendations: Vec<Recommendation> = scored
        .into_iter()
        .map(|(similarity, priority, candidate)| {
            let (score, mode) = if fallback {
                (priority / 10.0, RecommendationMode::PriorityFallback)
            } else {
                (similarity, RecommendationMode::Direct)
            };
            Recommendation {
                document: candidate.document.clone(),
                score,
                similarity,
                priority,
                metrics: context.book.metrics_or_default(candidate.path()),
                mode,
            }
        })
        .collect();

    sort_by_score(&mut recommendations);
    recommendations
}
