use chrono::Duration;
use std::sync::Arc;

use super::TtlCache;
use crate::clock::Clock;
use crate::error::Result;
use crate::logging::CacheStats;
use crate::text::truncate_chars;

/// Lifetime of cached document text
pub const CONTENT_TTL_SECS: i64 = 600;

/// Maximum characters of extracted text kept per document
pub const MAX_CONTENT_CHARS: usize = 50_000;

/// Extracted text of a document and its tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedContent {
    pub text: String,
    pub tokens: Vec<String>,
}

impl CachedContent {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Tokenized-content cache keyed by `(path, modify_time)`
#[derive(Debug)]
pub struct ContentCache {
    inner: TtlCache<Arc<CachedContent>>,
    max_chars: usize,
}

/// Cache key embedding the document's freshness
pub fn content_key(path: &str, modify_time: i64) -> String {
    format!("{}::{}", path, modify_time)
}

impl ContentCache {
    pub fn new(capacity: usize, ttl: Duration, max_chars: usize, clock: Arc<dyn Clock>) -> Self {
        ContentCache {
            inner: TtlCache::new(capacity, ttl, clock),
            max_chars,
        }
    }

    pub fn with_defaults(clock: Arc<dyn Clock>) -> Self {
        Self::new(
            super::DEFAULT_CAPACITY,
            Duration::seconds(CONTENT_TTL_SECS),
            MAX_CONTENT_CHARS,
            clock,
        )
    }

    pub fn get(&mut self, path: &str, modify_time: i64) -> Option<Arc<CachedContent>> {
        self.inner.get(&content_key(path, modify_time)).cloned()
    }

    /// Store text (capped at the configured length) with its tokens
    pub fn insert(
        &mut self,
        path: &str,
        modify_time: i64,
        text: &str,
        tokens: Vec<String>,
    ) -> Arc<CachedContent> {
        let content = Arc::new(CachedContent {
            text: truncate_chars(text, self.max_chars).to_string(),
            tokens,
        });
        self.inner
            .set(content_key(path, modify_time), Arc::clone(&content));
        content
    }

    /// Return the cached content, or load and cache it
    ///
    /// Load failures are returned to the caller and nothing is cached.
    pub fn get_or_try_insert_with<F>(
        &mut self,
        path: &str,
        modify_time: i64,
        load: F,
    ) -> Result<Arc<CachedContent>>
    where
        F: FnOnce() -> Result<(String, Vec<String>)>,
    {
        if let Some(content) = self.get(path, modify_time) {
            return Ok(content);
        }
        let (text, tokens) = load()?;
        Ok(self.insert(path, modify_time, &text, tokens))
    }

    pub fn evict_expired(&mut self) -> usize {
        self.inner.evict_expired()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn stats(&self) -> &CacheStats {
        self.inner.stats()
    }
}
