//! Similarity engine: TF-IDF vectors and cosine comparison
//!
//! Two comparison modes are offered:
//! - corpus mode builds a shared vocabulary ([`build_vocabulary`]) and compares
//!   L2-normalized TF-IDF vectors
//! - direct mode ([`direct_similarity`]) compares raw term-frequency maps of
//!   exactly two texts, with no vocabulary
//!
//! Every comparison returns a score in `[0, 1]`. Zero-magnitude or non-finite
//! inputs yield `0.0`.

mod corpus;
mod tfidf;

pub use corpus::SimilarityEngine;
pub use tfidf::{build_vocabulary, vectorize, Vocabulary};

use std::collections::BTreeMap;

use crate::text::tokenize;

/// Similarity score between a document and a reference
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityResult {
    /// Document path
    pub path: String,
    /// Similarity score (0.0 to 1.0)
    pub score: f64,
}

/// Sparse term-weight vector with its L2 magnitude
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentVector {
    terms: BTreeMap<String, f64>,
    magnitude: f64,
}

impl DocumentVector {
    /// Build a vector from term weights, dropping zero components
    pub fn from_weights(weights: BTreeMap<String, f64>) -> Self {
        let terms: BTreeMap<String, f64> = weights
            .into_iter()
            .filter(|(_, w)| *w != 0.0 && w.is_finite())
            .collect();
        let magnitude = l2_norm(&terms);
        DocumentVector { terms, magnitude }
    }

    /// The zero vector
    pub fn zero() -> Self {
        Self::default()
    }

    /// Nonzero components, ordered by term
    pub fn terms(&self) -> &BTreeMap<String, f64> {
        &self.terms
    }

    /// Weight of a term (0.0 when absent)
    pub fn weight(&self, term: &str) -> f64 {
        self.terms.get(term).copied().unwrap_or(0.0)
    }

    /// Magnitude stored when the vector was built
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Number of nonzero components
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// True when every component is zero
    pub fn is_zero(&self) -> bool {
        self.terms.values().all(|w| *w == 0.0)
    }
}

fn l2_norm(weights: &BTreeMap<String, f64>) -> f64 {
    weights.values().map(|w| w * w).sum::<f64>().sqrt()
}

/// Cosine similarity between two sparse weight maps
///
/// The dot product walks the map with fewer entries. Magnitudes are computed
/// from the components passed in, never from a stored field.
pub fn cosine_of_maps(a: &BTreeMap<String, f64>, b: &BTreeMap<String, f64>) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let dot: f64 = small
        .iter()
        .filter_map(|(term, weight)| large.get(term).map(|other| weight * other))
        .sum();

    let norm_a = l2_norm(a);
    let norm_b = l2_norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let score = dot / (norm_a * norm_b);
    if !score.is_finite() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}

/// Cosine similarity between two document vectors
pub fn cosine_similarity(a: &DocumentVector, b: &DocumentVector) -> f64 {
    cosine_of_maps(&a.terms, &b.terms)
}

/// Raw term counts of a token stream
pub fn term_frequencies<S: AsRef<str>>(tokens: &[S]) -> BTreeMap<String, f64> {
    let mut counts = BTreeMap::new();
    for token in tokens {
        *counts.entry(token.as_ref().to_string()).or_insert(0.0) += 1.0;
    }
    counts
}

/// Cosine similarity of raw term frequencies for two token streams
pub fn direct_similarity_tokens<S: AsRef<str>>(a: &[S], b: &[S]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    cosine_of_maps(&term_frequencies(a), &term_frequencies(b))
}

/// Cosine similarity of raw term frequencies for two cleaned texts
pub fn direct_similarity(text_a: &str, text_b: &str) -> f64 {
    direct_similarity_tokens(&tokenize(text_a), &tokenize(text_b))
}
