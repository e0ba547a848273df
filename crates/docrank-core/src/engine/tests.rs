#[cfg(test)]
#[allow(clippy::module_inception)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;

    use crate::clock::ManualClock;
    use crate::config::EngineConfig;
    use crate::engine::Engine;
    use crate::error::{DocrankError, Result};
    use crate::metrics::{CustomMetric, MetricsBook};
    use crate::ranking::RankingOptions;
    use crate::recommend::{RecommendRequest, RecommendationMode};
    use crate::store::{DocumentRef, DocumentStore, MemoryStore};

    const DAY_MS: i64 = 86_400_000;

    fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::from_millis(400 * DAY_MS))
    }

    fn rust_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store
            .insert("rust.md", "Rust ownership and borrowing keep memory safe")
            .insert("rust-copy.md", "Rust ownership and borrowing keep memory safe")
            .insert("garden.md", "Tomatoes need compost, sunlight and patient watering");
        store
    }

    /// A store that fails to read one path
    struct FlakyStore {
        inner: MemoryStore,
        broken: &'static str,
    }

    impl DocumentStore for FlakyStore {
        fn enumerate_tracked_documents(&self) -> Result<Vec<DocumentRef>> {
            self.inner.enumerate_tracked_documents()
        }

        fn read_text(&self, path: &str) -> Result<String> {
            if path == self.broken {
                return Err(DocrankError::io_operation("read", path, "device not ready"));
            }
            self.inner.read_text(path)
        }
    }

    #[test]
    fn test_corpus_mode_prefers_anchor_neighbours() {
        let clock = clock();
        let mut book = MetricsBook::new();
        book.touch("rust.md", 400 * DAY_MS);

        let mut engine =
            Engine::with_clock(rust_store(), EngineConfig::default(), book, clock.clone());
        let recommendations = engine.recommend(&RecommendRequest::default()).unwrap();

        let position = |path: &str| {
            recommendations
                .iter()
                .position(|r| r.document.path == path)
                .unwrap()
        };
        assert!(position("rust-copy.md") < position("garden.md"));
        assert!(recommendations.iter().all(|r| r.mode == RecommendationMode::Corpus));
        assert!(recommendations.iter().all(|r| (0.0..=1.0).contains(&r.score)));
    }

    #[test]
    fn test_empty_store_recommends_nothing() {
        let mut engine = Engine::with_clock(
            MemoryStore::new(),
            EngineConfig::default(),
            MetricsBook::new(),
            clock(),
        );
        assert!(engine.recommend(&RecommendRequest::default()).unwrap().is_empty());
        assert!(engine
            .generate_ranking(&RankingOptions::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_direct_mode_ranks_by_similarity() {
        let mut engine = Engine::with_clock(
            rust_store(),
            EngineConfig::default(),
            MetricsBook::new(),
            clock(),
        );
        let request = RecommendRequest {
            current: Some("rust.md".into()),
            limit: None,
        };
        let recommendations = engine.recommend(&request).unwrap();

        assert_eq!(recommendations.len(), 2);
        assert_eq!(recommendations[0].document.path, "rust-copy.md");
        assert_eq!(recommendations[0].mode, RecommendationMode::Direct);
        assert!((recommendations[0].score - 1.0).abs() < 1e-9);
        assert!(recommendations.iter().all(|r| r.document.path != "rust.md"));
    }

    #[test]
    fn test_direct_mode_unknown_current() {
        let mut engine = Engine::with_clock(
            rust_store(),
            EngineConfig::default(),
            MetricsBook::new(),
            clock(),
        );
        let err = engine.recommend_for("missing.md", None).unwrap_err();
        assert!(matches!(err, DocrankError::DocumentNotFound { .. }));
    }

    #[test]
    fn test_unreadable_documents_are_skipped() {
        let store = FlakyStore {
            inner: rust_store(),
            broken: "garden.md",
        };
        let mut engine =
            Engine::with_clock(store, EngineConfig::default(), MetricsBook::new(), clock());

        let recommendations = engine.recommend_corpus(None).unwrap();
        assert_eq!(recommendations.len(), 2);
        assert!(recommendations.iter().all(|r| r.document.path != "garden.md"));
    }

    #[test]
    fn test_excluded_paths_are_never_recommended() {
        let config = EngineConfig {
            excluded_paths: vec!["GARDEN*".into()],
            ..Default::default()
        };
        let mut engine = Engine::with_clock(rust_store(), config, MetricsBook::new(), clock());

        let recommendations = engine.recommend_corpus(None).unwrap();
        assert!(recommendations.iter().all(|r| r.document.path != "garden.md"));
        assert_eq!(recommendations.len(), 2);
    }

    #[test]
    fn test_limit_and_top_k() {
        let mut config = EngineConfig::default();
        config.recommendation.top_k = 1;
        let mut engine = Engine::with_clock(rust_store(), config, MetricsBook::new(), clock());

        assert_eq!(engine.recommend_corpus(None).unwrap().len(), 1);
        assert_eq!(engine.recommend_corpus(Some(3)).unwrap().len(), 3);
    }

    #[test]
    fn test_content_cache_reused_until_edit() {
        let mut engine = Engine::with_clock(
            rust_store(),
            EngineConfig::default(),
            MetricsBook::new(),
            clock(),
        );

        engine.recommend_corpus(None).unwrap();
        assert_eq!(engine.content_cache().stats().misses(), 3);
        assert_eq!(engine.vector_cache().stats().misses(), 3);

        engine.recommend_corpus(None).unwrap();
        assert_eq!(engine.content_cache().stats().misses(), 3);
        assert_eq!(engine.content_cache().stats().hits(), 3);
        assert_eq!(engine.vector_cache().stats().hits(), 3);

        // editing bumps the modify-time, so the key changes
        engine
            .store_mut()
            .insert("garden.md", "Tomatoes need compost and more sunlight");
        engine.recommend_corpus(None).unwrap();
        assert_eq!(engine.content_cache().stats().misses(), 4);
    }

    #[test]
    fn test_expired_content_is_reloaded() {
        let clock = clock();
        let mut engine = Engine::with_clock(
            rust_store(),
            EngineConfig::default(),
            MetricsBook::new(),
            clock.clone(),
        );

        engine.recommend_corpus(None).unwrap();
        clock.advance(Duration::minutes(20));
        assert!(engine.evict_expired() >= 3);
        assert!(engine.content_cache().is_empty());
    }

    #[test]
    fn test_direct_similarity_between() {
        let mut engine = Engine::with_clock(
            rust_store(),
            EngineConfig::default(),
            MetricsBook::new(),
            clock(),
        );
        let same = engine
            .direct_similarity_between("rust.md", "rust-copy.md")
            .unwrap();
        assert!((same - 1.0).abs() < 1e-9);

        let different = engine
            .direct_similarity_between("rust.md", "garden.md")
            .unwrap();
        assert_eq!(different, 0.0);
    }

    #[test]
    fn test_direct_similarity_rejects_short_text() {
        let mut store = rust_store();
        store.insert("tiny.md", "# Hi");
        let mut engine =
            Engine::with_clock(store, EngineConfig::default(), MetricsBook::new(), clock());

        let err = engine
            .direct_similarity_between("rust.md", "tiny.md")
            .unwrap_err();
        assert!(matches!(err, DocrankError::EmptyContent { len: 2, .. }));
    }

    #[test]
    fn test_calculate_priority_single_metric() {
        let config = EngineConfig {
            metrics: vec![CustomMetric {
                id: "importance".into(),
                display_name: "Importance".into(),
                weight: 100.0,
            }],
            ..Default::default()
        };
        let mut book = MetricsBook::new();
        book.set_value("rust.md", "importance", 10.0);

        let engine = Engine::with_clock(rust_store(), config, book, clock());
        assert!((engine.calculate_priority("rust.md") - 10.0).abs() < 1e-9);
        assert!((engine.calculate_priority("garden.md") - 5.0).abs() < 1e-9);
    }
}
