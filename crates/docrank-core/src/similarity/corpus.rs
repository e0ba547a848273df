use std::collections::BTreeMap;
use std::sync::Arc;

use super::{build_vocabulary, cosine_similarity, vectorize, DocumentVector, SimilarityResult, Vocabulary};

/// TF-IDF vectors for a fixed corpus of documents, keyed by path
#[derive(Debug, Clone, Default)]
pub struct SimilarityEngine {
    vocabulary: Vocabulary,
    vectors: BTreeMap<String, Arc<DocumentVector>>,
}

impl SimilarityEngine {
    /// Build the vocabulary and vectors for `(path, tokens)` pairs
    pub fn build<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [String])>,
    {
        let documents: Vec<(&str, &[String])> = documents.into_iter().collect();
        let token_lists: Vec<&[String]> = documents.iter().map(|(_, tokens)| *tokens).collect();
        let vocabulary = build_vocabulary(&token_lists);

        let vectors = documents
            .iter()
            .map(|(path, tokens)| (path.to_string(), Arc::new(vectorize(tokens, &vocabulary))))
            .collect();

        SimilarityEngine {
            vocabulary,
            vectors,
        }
    }

    /// Assemble an engine from vectors computed elsewhere (e.g. a vector cache)
    ///
    /// The vectors are shared, not copied.
    pub fn from_parts(
        vocabulary: Vocabulary,
        vectors: BTreeMap<String, Arc<DocumentVector>>,
    ) -> Self {
        SimilarityEngine {
            vocabulary,
            vectors,
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn vector(&self, path: &str) -> Option<&DocumentVector> {
        self.vectors.get(path).map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Cosine similarity between two documents of the corpus (0.0 if either is unknown)
    pub fn calculate_similarity(&self, path_a: &str, path_b: &str) -> f64 {
        match (self.vectors.get(path_a), self.vectors.get(path_b)) {
            (Some(a), Some(b)) => cosine_similarity(a, b),
            _ => 0.0,
        }
    }

    /// Mean similarity of `path` against the anchors it shares any terms with
    ///
    /// Anchors scoring zero are left out of the mean rather than counted as
    /// zero terms. The document itself is never its own anchor.
    pub fn average_anchor_similarity(&self, path: &str, anchors: &[String]) -> f64 {
        let positive: Vec<f64> = anchors
            .iter()
            .filter(|anchor| anchor.as_str() != path)
            .map(|anchor| self.calculate_similarity(path, anchor))
            .filter(|score| *score > 0.0)
            .collect();

        if positive.is_empty() {
            return 0.0;
        }
        positive.iter().sum::<f64>() / positive.len() as f64
    }

    /// Top `limit` documents most similar to `path` scoring at least `threshold`
    pub fn find_similar(&self, path: &str, limit: usize, threshold: f64) -> Vec<SimilarityResult> {
        let mut results: Vec<SimilarityResult> = self
            .vectors
            .keys()
            .filter(|other| other.as_str() != path)
            .map(|other| SimilarityResult {
                path: other.clone(),
                score: self.calculate_similarity(path, other),
            })
            .filter(|result| result.score >= threshold)
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.path.cmp(&b.path)));
        results.truncate(limit);
        results
    }
}
