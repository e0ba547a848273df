//! Engine context
//!
//! [`Engine`] wires a document store to the caches, scorer and recommendation
//! modes. Everything it needs is passed in explicitly; two engines with
//! different configurations can coexist in one process.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Instant;

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::cache::{CachedContent, ContentCache, VectorCache};
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::error::{DocrankError, Result};
use crate::metrics::{MetricSet, MetricsBook};
use crate::priority::PriorityScorer;
use crate::ranking::{self, RankingEntry, RankingOptions};
use crate::recommend::{
    dedupe, score_corpus, score_direct, select_anchors, select_candidates, CorpusWeights,
    ExclusionSet, LoadedDocument, RecommendRequest, Recommendation, ScoringContext,
};
use crate::similarity::{build_vocabulary, direct_similarity_tokens, vectorize, SimilarityEngine};
use crate::store::{DocumentRef, DocumentStore};
use crate::text::{extract_text, tokenize_with_stemming};
use crate::{log_cache_stats, trace_time};

/// Scoring and recommendation over one document store
pub struct Engine<S: DocumentStore> {
    store: S,
    config: EngineConfig,
    metrics: MetricSet,
    book: MetricsBook,
    exclusions: ExclusionSet,
    clock: Arc<dyn Clock>,
    content_cache: ContentCache,
    vector_cache: VectorCache,
}

impl<S: DocumentStore> std::fmt::Debug for Engine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("metrics", &self.metrics)
            .field("documents", &self.book.len())
            .field("content_cache", &self.content_cache.len())
            .field("vector_cache", &self.vector_cache.len())
            .finish_non_exhaustive()
    }
}

impl<S: DocumentStore> Engine<S> {
    pub fn new(store: S, config: EngineConfig, book: MetricsBook) -> Self {
        Self::with_clock(store, config, book, Arc::new(SystemClock))
    }

    pub fn with_clock(
        store: S,
        config: EngineConfig,
        book: MetricsBook,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let metrics = config.metric_set();
        let exclusions = ExclusionSet::new(&config.excluded_paths);
        let content_cache = ContentCache::new(
            config.cache.capacity,
            config.cache.content_ttl(),
            config.cache.max_content_chars,
            Arc::clone(&clock),
        );
        let vector_cache = VectorCache::new(
            config.cache.capacity,
            config.cache.vector_ttl(),
            Arc::clone(&clock),
        );

        Engine {
            store,
            config,
            metrics,
            book,
            exclusions,
            clock,
            content_cache,
            vector_cache,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn metrics(&self) -> &MetricSet {
        &self.metrics
    }

    pub fn book(&self) -> &MetricsBook {
        &self.book
    }

    pub fn book_mut(&mut self) -> &mut MetricsBook {
        &mut self.book
    }

    pub fn into_book(self) -> MetricsBook {
        self.book
    }

    /// Priority of a document from its stored metrics (missing values count as 5)
    pub fn calculate_priority(&self, path: &str) -> f64 {
        PriorityScorer::new(&self.metrics).calculate_priority(&self.book.metrics_or_default(path))
    }

    /// Rank every tracked document by priority
    pub fn generate_ranking(&self, options: &RankingOptions) -> Result<Vec<RankingEntry>> {
        let mut documents = self.store.enumerate_tracked_documents()?;
        documents.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(ranking::generate_ranking(
            &documents,
            &self.book,
            &self.metrics,
            options,
        ))
    }

    /// Recommend against `request.current` if set, otherwise against the anchors
    pub fn recommend(&mut self, request: &RecommendRequest) -> Result<Vec<Recommendation>> {
        match request.current.as_deref() {
            Some(current) => self.recommend_for(current, request.limit),
            None => self.recommend_corpus(request.limit),
        }
    }

    /// Corpus mode: TF-IDF similarity to anchors blended with priority and decay
    #[tracing::instrument(skip(self))]
    pub fn recommend_corpus(&mut self, limit: Option<usize>) -> Result<Vec<Recommendation>> {
        let start = Instant::now();
        self.evict_expired();

        let documents = self.store.enumerate_tracked_documents()?;
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let settings = self.config.recommendation.clone();
        let candidates = select_candidates(
            &documents,
            &self.exclusions,
            None,
            settings.max_candidates,
        );
        let anchor_paths = select_anchors(&documents, &self.book, &settings);

        let mut corpus = self.load_documents(&candidates);
        let loaded: BTreeSet<String> = corpus.iter().map(|d| d.path().to_string()).collect();
        let extra: Vec<DocumentRef> = documents
            .iter()
            .filter(|d| anchor_paths.contains(&d.path) && !loaded.contains(&d.path))
            .cloned()
            .collect();
        corpus.extend(self.load_documents(&extra));
        trace_time!(start, "load_corpus", documents = corpus.len());

        let min_text_chars = self.config.similarity.min_text_chars;
        let anchors: Vec<String> = anchor_paths
            .into_iter()
            .filter(|path| {
                corpus
                    .iter()
                    .any(|d| d.path() == path.as_str() && !d.is_degenerate(min_text_chars))
            })
            .collect();

        let similarity = self.corpus_similarity(&corpus);
        trace_time!(start, "vectorize_corpus", terms = similarity.vocabulary().len());

        let candidate_paths: BTreeSet<&str> = candidates.iter().map(|d| d.path.as_str()).collect();
        let scored_candidates: Vec<LoadedDocument> = corpus
            .iter()
            .filter(|d| candidate_paths.contains(d.path()))
            .cloned()
            .collect();

        debug!(
            candidates = scored_candidates.len(),
            anchors = anchors.len(),
            "scoring corpus recommendations"
        );

        let scored = score_corpus(
            &similarity,
            &scored_candidates,
            &anchors,
            &self.scoring_context(),
            &CorpusWeights::default(),
        );
        trace_time!(start, "score_corpus");

        Ok(self.finish(scored, limit))
    }

    /// Direct mode: raw term-frequency similarity to `current`
    #[tracing::instrument(skip(self))]
    pub fn recommend_for(&mut self, current: &str, limit: Option<usize>) -> Result<Vec<Recommendation>> {
        let start = Instant::now();
        self.evict_expired();

        let documents = self.store.enumerate_tracked_documents()?;
        if documents.is_empty() {
            return Ok(Vec::new());
        }
        let current_ref = documents
            .iter()
            .find(|d| d.path == current)
            .cloned()
            .ok_or_else(|| DocrankError::document_not_found(current))?;

        let current_doc = match self.load_content(&current_ref) {
            Ok(content) => LoadedDocument {
                document: current_ref,
                content,
            },
            Err(e) => {
                warn!(path = %current, error = %e, "current document unreadable, ranking by priority");
                LoadedDocument {
                    document: current_ref,
                    content: Arc::new(CachedContent {
                        text: String::new(),
                        tokens: Vec::new(),
                    }),
                }
            }
        };

        let candidates = select_candidates(
            &documents,
            &self.exclusions,
            Some(current),
            self.config.recommendation.max_candidates,
        );
        let loaded = self.load_documents(&candidates);
        trace_time!(start, "load_candidates", documents = loaded.len());

        let scored = score_direct(&current_doc, &loaded, &self.scoring_context());
        trace_time!(start, "score_direct");

        Ok(self.finish(scored, limit))
    }

    /// Term-frequency cosine similarity of two tracked documents
    ///
    /// Fails with `EmptyContent` when either text is too short to compare.
    pub fn direct_similarity_between(&mut self, path_a: &str, path_b: &str) -> Result<f64> {
        let documents = self.store.enumerate_tracked_documents()?;
        let find = |path: &str| {
            documents
                .iter()
                .find(|d| d.path == path)
                .cloned()
                .ok_or_else(|| DocrankError::document_not_found(path))
        };
        let a = find(path_a)?;
        let b = find(path_b)?;

        let min_text_chars = self.config.similarity.min_text_chars;
        let mut load = |document: &DocumentRef| -> Result<Arc<CachedContent>> {
            let content = self.load_content(document)?;
            if content.char_count() < min_text_chars {
                return Err(DocrankError::EmptyContent {
                    path: document.path.clone(),
                    len: content.char_count(),
                });
            }
            Ok(content)
        };
        let content_a = load(&a)?;
        let content_b = load(&b)?;

        Ok(direct_similarity_tokens(&content_a.tokens, &content_b.tokens))
    }

    /// Drop expired cache entries; returns how many were removed
    pub fn evict_expired(&mut self) -> usize {
        self.content_cache.evict_expired() + self.vector_cache.evict_expired()
    }

    pub fn clear_caches(&mut self) {
        self.content_cache.clear();
        self.vector_cache.clear();
    }

    pub fn content_cache(&self) -> &ContentCache {
        &self.content_cache
    }

    pub fn vector_cache(&self) -> &VectorCache {
        &self.vector_cache
    }

    pub fn log_cache_stats(&self) {
        log_cache_stats!(self.content_cache.stats(), "content_cache");
        log_cache_stats!(self.vector_cache.stats(), "vector_cache");
    }

    fn scoring_context(&self) -> ScoringContext<'_> {
        ScoringContext {
            book: &self.book,
            metrics: &self.metrics,
            now_millis: self.clock.now_millis(),
            min_text_chars: self.config.similarity.min_text_chars,
        }
    }

    fn finish(&self, scored: Vec<Recommendation>, limit: Option<usize>) -> Vec<Recommendation> {
        let mut recommendations = dedupe(scored);
        recommendations.truncate(limit.unwrap_or(self.config.recommendation.top_k));
        self.log_cache_stats();
        recommendations
    }

    /// Extracted text and tokens of a document, through the content cache
    fn load_content(&mut self, document: &DocumentRef) -> Result<Arc<CachedContent>> {
        let store = &self.store;
        let max_paragraphs = self.config.recommendation.max_paragraphs;
        let max_chars = self.config.cache.max_content_chars;
        let stemming = self.config.similarity.stemming;

        self.content_cache
            .get_or_try_insert_with(&document.path, document.modify_time, || {
                let raw = store.read_text(&document.path)?;
                let text = extract_text(&raw, max_paragraphs, max_chars);
                let tokens = tokenize_with_stemming(&text, stemming);
                Ok((text, tokens))
            })
    }

    /// Load every document that can be read; failures are logged and skipped
    fn load_documents(&mut self, documents: &[DocumentRef]) -> Vec<LoadedDocument> {
        let mut loaded = Vec::with_capacity(documents.len());
        for document in documents {
            match self.load_content(document) {
                Ok(content) => loaded.push(LoadedDocument {
                    document: document.clone(),
                    content,
                }),
                Err(e) => {
                    warn!(path = %document.path, error = %e, "skipping unreadable document");
                }
            }
        }
        loaded
    }

    /// TF-IDF vectors for `corpus`, reusing cached vectors of the same corpus
    fn corpus_similarity(&mut self, corpus: &[LoadedDocument]) -> SimilarityEngine {
        let purpose = corpus_fingerprint(corpus, self.config.similarity.stemming);
        let token_lists: Vec<&[String]> = corpus.iter().map(|d| d.content.tokens.as_slice()).collect();
        let vocabulary = build_vocabulary(&token_lists);

        let mut vectors = BTreeMap::new();
        for document in corpus {
            let vector = self.vector_cache.get_or_insert_with(
                document.path(),
                document.document.modify_time,
                &purpose,
                || vectorize(&document.content.tokens, &vocabulary),
            );
            vectors.insert(document.path().to_string(), vector);
        }

        SimilarityEngine::from_parts(vocabulary, vectors)
    }
}

/// Identity of a corpus: its member paths and modify-times
///
/// IDF depends on every member, so a vector is only reusable for the exact
/// same corpus.
fn corpus_fingerprint(corpus: &[LoadedDocument], stemming: bool) -> String {
    let mut members: Vec<(&str, i64)> = corpus
        .iter()
        .map(|d| (d.path(), d.document.modify_time))
        .collect();
    members.sort_unstable();

    let mut hasher = Sha256::new();
    let mode: &[u8] = if stemming { b"stem\n" } else { b"raw\n" };
    hasher.update(mode);
    for (path, modify_time) in members {
        hasher.update(path.as_bytes());
        hasher.update(b"\0");
        hasher.update(modify_time.to_le_bytes());
        hasher.update(b"\n");
    }
    let full_hex = hex::encode(hasher.finalize());
    full_hex[..16].to_string()
}

#[cfg(test)]
mod tests;
