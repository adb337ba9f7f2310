//! Bounded TTL cache for geocoding and location lookups.
//!
//! Provides a thread-safe cache where every entry has a bounded lifetime and
//! the whole cache has a bounded entry count, so long-running processes cannot
//! grow memory without limit. Values are idempotent functions of their key, so
//! last-writer-wins on concurrent inserts is acceptable.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

/// A thread-safe cache bounded by entry count and entry age.
///
/// Expired entries are treated as a miss even while still resident. When an
/// insert pushes the cache past capacity, the least-recently-used entries are
/// evicted until the bound holds again.
pub struct TtlCache<K, V> {
    inner: RwLock<Inner<K, V>>,
    capacity: usize,
    ttl: Duration,
}

struct Inner<K, V> {
    entries: HashMap<K, Entry<V>>,
    /// Monotonic access counter used for LRU ordering.
    tick: u64,
}

struct Entry<V> {
    value: V,
    inserted_at: Instant,
    last_used: u64,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    /// Create a new cache holding at most `capacity` entries for at most `ttl` each.
    #[must_use]
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            inner: RwLock::new(Inner {
                entries: HashMap::new(),
                tick: 0,
            }),
            capacity,
            ttl,
        }
    }

    /// Get a value if it exists and hasn't expired, marking it as recently used.
    pub async fn get(&self, key: &K) -> Option<V> {
        let mut inner = self.inner.write().await;
        inner.tick += 1;
        let tick = inner.tick;
        let ttl = self.ttl;
        let entry = inner.entries.get_mut(key)?;
        if entry.inserted_at.elapsed() >= ttl {
            return None;
        }
        entry.last_used = tick;
        Some(entry.value.clone())
    }

    /// Insert a value, replacing any existing entry and resetting its TTL.
    ///
    /// Evicts least-recently-used entries if the capacity bound is exceeded.
    pub async fn insert(&self, key: K, value: V) {
        self.insert_with_timestamp(key, value, Instant::now()).await;
    }

    /// Insert a value with an explicit insertion timestamp (tests only).
    #[doc(hidden)]
    pub async fn insert_at(&self, key: K, value: V, inserted_at: Instant) {
        self.insert_with_timestamp(key, value, inserted_at).await;
    }

    async fn insert_with_timestamp(&self, key: K, value: V, inserted_at: Instant) {
        let mut inner = self.inner.write().await;
        inner.tick += 1;
        let tick = inner.tick;
        inner.entries.insert(
            key,
            Entry {
                value,
                inserted_at,
                last_used: tick,
            },
        );

        while inner.entries.len() > self.capacity {
            let Some(oldest) = inner
                .entries
                .iter()
                .min_by_key(|(_, e)| e.last_used)
                .map(|(k, _)| k.clone())
            else {
                break;
            };
            inner.entries.remove(&oldest);
        }
    }

    /// Current number of resident entries, including expired ones not yet evicted.
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    /// Whether the cache holds no entries at all.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_and_get() {
        let cache: TtlCache<String, i32> = TtlCache::new(10, Duration::from_secs(60));
        cache.insert("key".to_string(), 42).await;
        assert_eq!(cache.get(&"key".to_string()).await, Some(42));
    }

    #[tokio::test]
    async fn get_returns_none_for_missing() {
        let cache: TtlCache<String, i32> = TtlCache::new(10, Duration::from_secs(60));
        assert_eq!(cache.get(&"missing".to_string()).await, None);
    }

    #[tokio::test]
    async fn expired_entries_are_a_miss() {
        let ttl = Duration::from_millis(10);
        let cache: TtlCache<String, i32> = TtlCache::new(10, ttl);
        let expired_at = Instant::now() - (ttl + Duration::from_millis(1));
        cache.insert_at("key".to_string(), 42, expired_at).await;

        assert_eq!(cache.get(&"key".to_string()).await, None);
    }

    #[tokio::test]
    async fn insert_refreshes_expired_entry() {
        let ttl = Duration::from_millis(10);
        let cache: TtlCache<String, i32> = TtlCache::new(10, ttl);
        let expired_at = Instant::now() - (ttl + Duration::from_millis(1));
        cache.insert_at("key".to_string(), 1, expired_at).await;
        cache.insert("key".to_string(), 2).await;

        assert_eq!(cache.get(&"key".to_string()).await, Some(2));
    }

    #[tokio::test]
    async fn capacity_bound_evicts_least_recently_used() {
        let cache: TtlCache<String, i32> = TtlCache::new(2, Duration::from_secs(60));
        cache.insert("a".to_string(), 1).await;
        cache.insert("b".to_string(), 2).await;

        // Touch "a" so "b" becomes the LRU entry.
        assert_eq!(cache.get(&"a".to_string()).await, Some(1));

        cache.insert("c".to_string(), 3).await;

        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.get(&"a".to_string()).await, Some(1));
        assert_eq!(cache.get(&"b".to_string()).await, None);
        assert_eq!(cache.get(&"c".to_string()).await, Some(3));
    }

    #[tokio::test]
    async fn replacing_a_key_does_not_evict() {
        let cache: TtlCache<String, i32> = TtlCache::new(2, Duration::from_secs(60));
        cache.insert("a".to_string(), 1).await;
        cache.insert("b".to_string(), 2).await;
        cache.insert("a".to_string(), 3).await;

        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.get(&"a".to_string()).await, Some(3));
        assert_eq!(cache.get(&"b".to_string()).await, Some(2));
    }

    #[tokio::test]
    async fn is_empty_reflects_contents() {
        let cache: TtlCache<String, i32> = TtlCache::new(2, Duration::from_secs(60));
        assert!(cache.is_empty().await);
        cache.insert("a".to_string(), 1).await;
        assert!(!cache.is_empty().await);
    }
}
