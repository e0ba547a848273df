use std::collections::BTreeSet;

use crate::config::RecommendationSettings;
use crate::metrics::MetricsBook;
use crate::store::DocumentRef;

/// Reference documents for corpus-mode similarity
///
/// The `recent_count` most recently visited documents, then the `top_count`
/// most visited ones, de-duplicated by path. Documents never visited (or never
/// edited, for the frequency list) do not qualify. Ties break by path.
pub fn select_anchors(
    documents: &[DocumentRef],
    book: &MetricsBook,
    settings: &RecommendationSettings,
) -> Vec<String> {
    let mut recent: Vec<(&str, i64)> = documents
        .iter()
        .filter_map(|d| {
            let last_visited = book.get(&d.path)?.last_visited;
            (last_visited > 0).then_some((d.path.as_str(), last_visited))
        })
        .collect();
    recent.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut frequent: Vec<(&str, u32)> = documents
        .iter()
        .filter_map(|d| {
            let visit_count = book.get(&d.path)?.visit_count;
            (visit_count > 0).then_some((d.path.as_str(), visit_count))
        })
        .collect();
    frequent.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut seen = BTreeSet::new();
    recent
        .into_iter()
        .take(settings.recent_count)
        .map(|(path, _)| path)
        .chain(
            frequent
                .into_iter()
                .take(settings.top_count)
                .map(|(path, _)| path),
        )
        .filter(|path| seen.insert(*path))
        .map(str::to_string)
        .collect()
}
