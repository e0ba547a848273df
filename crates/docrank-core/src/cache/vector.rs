use chrono::Duration;
use std::sync::Arc;

use super::TtlCache;
use crate::clock::Clock;
use crate::logging::CacheStats;
use crate::similarity::DocumentVector;

/// Lifetime of cached vectors
pub const VECTOR_TTL_SECS: i64 = 900;

/// Vector cache keyed by `(path, modify_time, purpose)`
///
/// `purpose` distinguishes vectors of the same document computed against
/// different vocabularies.
#[derive(Debug)]
pub struct VectorCache {
    inner: TtlCache<Arc<DocumentVector>>,
}

pub fn vector_key(path: &str, modify_time: i64, purpose: &str) -> String {
    format!("{}::{}::{}", path, modify_time, purpose)
}

impl VectorCache {
    pub fn new(capacity: usize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        VectorCache {
            inner: TtlCache::new(capacity, ttl, clock),
        }
    }

    pub fn with_defaults(clock: Arc<dyn Clock>) -> Self {
        Self::new(
            super::DEFAULT_CAPACITY,
            Duration::seconds(VECTOR_TTL_SECS),
            clock,
        )
    }

    pub fn get(&mut self, path: &str, modify_time: i64, purpose: &str) -> Option<Arc<DocumentVector>> {
        self.inner.get(&vector_key(path, modify_time, purpose)).cloned()
    }

    pub fn insert(
        &mut self,
        path: &str,
        modify_time: i64,
        purpose: &str,
        vector: DocumentVector,
    ) -> Arc<DocumentVector> {
        let vector = Arc::new(vector);
        self.inner
            .set(vector_key(path, modify_time, purpose), Arc::clone(&vector));
        vector
    }

    /// Return the cached vector, or compute and cache it
    pub fn get_or_insert_with<F>(
        &mut self,
        path: &str,
        modify_time: i64,
        purpose: &str,
        compute: F,
    ) -> Arc<DocumentVector>
    where
        F: FnOnce() -> DocumentVector,
    {
        match self.get(path, modify_time, purpose) {
            Some(vector) => vector,
            None => self.insert(path, modify_time, purpose, compute()),
        }
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
