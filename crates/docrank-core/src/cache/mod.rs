//! TTL and capacity bounded caches for derived document state
//!
//! Entries expire `ttl` after insertion and are dropped lazily on read, or in
//! bulk by [`TtlCache::evict_expired`]. When an insert would exceed capacity the
//! oldest tenth of the entries, by insertion order, is evicted first.
//!
//! Keys of the specialized caches embed the document modify-time, so editing a
//! document yields a new key and stale entries simply age out. The cache is an
//! optimization only; every value can be recomputed from the document store.

mod content;
mod vector;

pub use content::{content_key, CachedContent, ContentCache, CONTENT_TTL_SECS, MAX_CONTENT_CHARS};
pub use vector::{vector_key, VectorCache, VECTOR_TTL_SECS};

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;

use crate::clock::Clock;
use crate::logging::CacheStats;

/// Default entry lifetime
pub const DEFAULT_TTL_SECS: i64 = 300;

/// Default maximum number of entries
pub const DEFAULT_CAPACITY: usize = 1000;

/// A cached value with its lifetime bounds
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    sequence: u64,
}

impl<V> CacheEntry<V> {
    /// Valid while `now <= expires_at`
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        now <= self.expires_at
    }
}

/// Generic string-keyed cache with per-entry TTL and a capacity bound
pub struct TtlCache<V> {
    entries: HashMap<String, CacheEntry<V>>,
    capacity: usize,
    default_ttl: Duration,
    clock: Arc<dyn Clock>,
    stats: CacheStats,
    next_sequence: u64,
}

impl<V> std::fmt::Debug for TtlCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

impl<V> TtlCache<V> {
    /// Create a cache; a zero capacity is raised to 1
    pub fn new(capacity: usize, default_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        TtlCache {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            default_ttl,
            clock,
            stats: CacheStats::new(),
            next_sequence: 0,
        }
    }

    /// Create a cache with the default capacity and TTL
    pub fn with_defaults(clock: Arc<dyn Clock>) -> Self {
        Self::new(DEFAULT_CAPACITY, Duration::seconds(DEFAULT_TTL_SECS), clock)
    }

    /// Look up a live entry, deleting it if it has expired
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let now = self.clock.now();
        let expired = match self.entries.get(key) {
            None => {
                self.stats.record_miss();
                return None;
            }
            Some(entry) => !entry.is_valid(now),
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_evictions(1);
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key).map(|entry| &entry.value)
    }

    /// Insert with the default TTL
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        let ttl = self.default_ttl;
        self.set_with_ttl(key, value, ttl);
    }

    /// Insert with an explicit TTL, evicting the oldest entries if full
    pub fn set_with_ttl(&mut self, key: impl Into<String>, value: V, ttl: Duration) {
        let key = key.into();
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.evict_oldest();
        }

        let now = self.clock.now();
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        self.entries.insert(
            key,
            CacheEntry {
                value,
                created_at: now,
                expires_at: now + ttl,
                sequence,
            },
        );
    }

    /// Remove an entry; returns whether it was present
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop every expired entry; returns how many were removed
    pub fn evict_expired(&mut self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_valid(now));
        let removed = before - self.entries.len();
        self.stats.record_evictions(removed as u64);
        removed
    }

    /// Number of stored entries, including expired ones not yet swept
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether a key is stored, without expiring it
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    fn evict_oldest(&mut self) {
        let count = (self.entries.len() / 10).max(1);

        let mut by_age: Vec<(u64, String)> = self
            .entries
            .iter()
            .map(|(key, entry)| (entry.sequence, key.clone()))
            .collect();
        by_age.sort_unstable();

        for (_, key) in by_age.into_iter().take(count) {
            self.entries.remove(&key);
        }
        self.stats.record_evictions(count as u64);
        tracing::debug!(evicted = count, capacity = self.capacity, "cache_evict_oldest");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn cache_with_clock(capacity: usize) -> (TtlCache<u32>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::from_millis(1_700_000_000_000));
        let cache = TtlCache::new(capacity, Duration::seconds(60), clock.clone());
        (cache, clock)
    }

    #[test]
    fn test_set_then_get() {
        let (mut cache, _clock) = cache_with_clock(10);
        cache.set("k", 7);
        assert_eq!(cache.get("k"), Some(&7));
        assert_eq!(cache.stats().hits(), 1);
    }

    #[test]
    fn test_get_missing_is_none() {
        let (mut cache, _clock) = cache_with_clock(10);
        assert_eq!(cache.get("nope"), None);
        assert_eq!(cache.stats().misses(), 1);
    }

    #[test]
    fn test_entry_valid_until_expiry_inclusive() {
        let (mut cache, clock) = cache_with_clock(10);
        cache.set_with_ttl("k", 1, Duration::seconds(5));

        clock.advance(Duration::seconds(5));
        assert_eq!(cache.get("k"), Some(&1));

        clock.advance(Duration::milliseconds(1));
        assert_eq!(cache.get("k"), None);
        // expire-on-read removed the entry
        assert!(!cache.contains_key("k"));
        assert_eq!(cache.stats().evictions(), 1);
        assert_eq!(cache.stats().misses(), 1);
    }

    #[test]
    fn test_evict_expired_sweeps_all() {
        let (mut cache, clock) = cache_with_clock(10);
        cache.set_with_ttl("short-1", 1, Duration::seconds(1));
        cache.set_with_ttl("short-2", 2, Duration::seconds(1));
        cache.set_with_ttl("long", 3, Duration::seconds(100));

        clock.advance(Duration::seconds(2));
        assert_eq!(cache.evict_expired(), 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains_key("long"));
    }

    #[test]
    fn test_capacity_evicts_oldest_first() {
        let (mut cache, _clock) = cache_with_clock(10);
        for i in 0..10 {
            cache.set(format!("k{}", i), i);
        }
        assert_eq!(cache.len(), 10);

        cache.set("k10", 10);
        assert_eq!(cache.len(), 10);
        assert!(!cache.contains_key("k0"));
        assert!(cache.contains_key("k1"));
        assert!(cache.contains_key("k10"));
        assert_eq!(cache.stats().evictions(), 1);
    }

    #[test]
    fn test_capacity_evicts_ten_percent() {
        let (mut cache, _clock) = cache_with_clock(100);
        for i in 0..100 {
            cache.set(format!("k{}", i), i);
        }
        cache.set("new", 1000);

        assert_eq!(cache.len(), 91);
        for i in 0..10 {
            assert!(!cache.contains_key(&format!("k{}", i)));
        }
        assert!(cache.contains_key("k10"));
    }

    #[test]
    fn test_overwrite_does_not_evict() {
        let (mut cache, _clock) = cache_with_clock(2);
        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("a", 3);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a"), Some(&3));
        assert_eq!(cache.get("b"), Some(&2));
    }

    #[test]
    fn test_overwrite_refreshes_insertion_order() {
        let (mut cache, _clock) = cache_with_clock(2);
        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("a", 3);
        cache.set("c", 4);
        // "b" is now the oldest insertion
        assert!(!cache.contains_key("b"));
        assert!(cache.contains_key("a"));
    }

    #[test]
    fn test_delete_and_clear() {
        let (mut cache, _clock) = cache_with_clock(10);
        cache.set("a", 1);
        cache.set("b", 2);
        assert!(cache.delete("a"));
        assert!(!cache.delete("a"));
        cache.clear();
        assert!(cache.is_empty());
    }
}
