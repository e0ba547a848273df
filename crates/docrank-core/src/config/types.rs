//! Configuration type definitions

use serde::{Deserialize, Serialize};

use crate::metrics::CustomMetric;

/// Current workspace format version
pub const WORKSPACE_FORMAT_VERSION: u32 = 1;

/// Engine configuration, stored in `.docrank/config.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Format version for compatibility checking
    #[serde(default = "default_version")]
    pub version: u32,

    /// Ordered custom metrics; weights are renormalized on load
    #[serde(default = "default_metrics")]
    pub metrics: Vec<CustomMetric>,

    #[serde(default)]
    pub recommendation: RecommendationSettings,

    /// Glob-like patterns (`*` wildcard, case-insensitive) never recommended
    #[serde(default)]
    pub excluded_paths: Vec<String>,

    #[serde(default)]
    pub cache: CacheSettings,

    #[serde(default)]
    pub similarity: SimilaritySettings,
}

/// Anchor and candidate limits for recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSettings {
    /// Anchors taken from the most recently visited documents
    #[serde(default = "default_recent_count")]
    pub recent_count: usize,

    /// Anchors taken from the most visited documents
    #[serde(default = "default_top_count")]
    pub top_count: usize,

    /// Maximum recommendations returned
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Maximum candidates scored per request
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,

    /// Paragraphs of each document used for similarity (0 = all)
    #[serde(default = "default_max_paragraphs")]
    pub max_paragraphs: usize,
}

/// Capacity and lifetimes of the content and vector caches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    #[serde(default = "default_ttl_secs")]
    pub default_ttl_secs: i64,

    #[serde(default = "default_content_ttl_secs")]
    pub content_ttl_secs: i64,

    #[serde(default = "default_vector_ttl_secs")]
    pub vector_ttl_secs: i64,

    /// Cached text is truncated to this many characters
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilaritySettings {
    /// Extracted text shorter than this never scores above zero
    #[serde(default = "default_min_text_chars")]
    pub min_text_chars: usize,

    /// Stem Latin tokens before vectorizing
    #[serde(default)]
    pub stemming: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            version: WORKSPACE_FORMAT_VERSION,
            metrics: default_metrics(),
            recommendation: RecommendationSettings::default(),
            excluded_paths: Vec::new(),
            cache: CacheSettings::default(),
            similarity: SimilaritySettings::default(),
        }
    }
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        RecommendationSettings {
            recent_count: default_recent_count(),
            top_count: default_top_count(),
            top_k: default_top_k(),
            max_candidates: default_max_candidates(),
            max_paragraphs: default_max_paragraphs(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        CacheSettings {
            capacity: default_capacity(),
            default_ttl_secs: default_ttl_secs(),
            content_ttl_secs: default_content_ttl_secs(),
            vector_ttl_secs: default_vector_ttl_secs(),
            max_content_chars: default_max_content_chars(),
        }
    }
}

impl Default for SimilaritySettings {
    fn default() -> Self {
        SimilaritySettings {
            min_text_chars: default_min_text_chars(),
            stemming: false,
        }
    }
}

fn default_version() -> u32 {
    WORKSPACE_FORMAT_VERSION
}

fn default_metrics() -> Vec<CustomMetric> {
    crate::metrics::MetricSet::default().as_slice().to_vec()
}

fn default_recent_count() -> usize {
    5
}

fn default_top_count() -> usize {
    5
}

fn default_top_k() -> usize {
    10
}

fn default_max_candidates() -> usize {
    100
}

fn default_max_paragraphs() -> usize {
    10
}

fn default_capacity() -> usize {
    crate::cache::DEFAULT_CAPACITY
}

fn default_ttl_secs() -> i64 {
    crate::cache::DEFAULT_TTL_SECS
}

fn default_content_ttl_secs() -> i64 {
    crate::cache::CONTENT_TTL_SECS
}

fn default_vector_ttl_secs() -> i64 {
    crate::cache::VECTOR_TTL_SECS
}

fn default_max_content_chars() -> usize {
    crate::cache::MAX_CONTENT_CHARS
}

fn default_min_text_chars() -> usize {
    10
}
