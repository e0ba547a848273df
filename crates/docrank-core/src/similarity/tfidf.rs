use std::collections::{BTreeMap, BTreeSet};

use super::{term_frequencies, DocumentVector};

/// Corpus statistics: document frequency per term and corpus size
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    document_frequency: BTreeMap<String, usize>,
    document_count: usize,
}

impl Vocabulary {
    /// Number of documents the vocabulary was built from
    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Number of documents containing `term` at least once
    pub fn document_frequency(&self, term: &str) -> usize {
        self.document_frequency.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.document_frequency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document_frequency.is_empty()
    }

    /// `ln(N / df)`, or `None` for a term outside the corpus
    pub fn idf(&self, term: &str) -> Option<f64> {
        let df = self.document_frequency(term);
        if df == 0 || self.document_count == 0 {
            return None;
        }
        Some((self.document_count as f64 / df as f64).ln())
    }
}

/// Build document frequencies over a corpus of token streams
pub fn build_vocabulary<T: AsRef<[String]>>(documents: &[T]) -> Vocabulary {
    let mut document_frequency = BTreeMap::new();

    for tokens in documents {
        let unique: BTreeSet<&str> = tokens.as_ref().iter().map(String::as_str).collect();
        for term in unique {
            *document_frequency.entry(term.to_string()).or_insert(0) += 1;
        }
    }

    Vocabulary {
        document_frequency,
        document_count: documents.len(),
    }
}

/// Build the L2-normalized TF-IDF vector of a token stream
///
/// `tf = count / |tokens|`, `idf = ln(N / df)`. Terms outside the vocabulary
/// carry no weight. A vector whose magnitude is zero before normalization
/// stays the zero vector.
pub fn vectorize(tokens: &[String], vocabulary: &Vocabulary) -> DocumentVector {
    if tokens.is_empty() {
        return DocumentVector::zero();
    }

    let total = tokens.len() as f64;
    let weights: BTreeMap<String, f64> = term_frequencies(tokens)
        .into_iter()
        .filter_map(|(term, count)| {
            let idf = vocabulary.idf(&term)?;
            Some((term, (count / total) * idf))
        })
        .collect();

    let magnitude = weights.values().map(|w| w * w).sum::<f64>().sqrt();
    if magnitude == 0.0 || !magnitude.is_finite() {
        return DocumentVector::zero();
    }

    DocumentVector::from_weights(
        weights
            .into_iter()
            .map(|(term, w)| (term, w / magnitude))
            .collect(),
    )
}
