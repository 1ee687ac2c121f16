//! In-memory cache implementation with LRU eviction.
//!
//! Provides a thread-safe in-memory cache with TTL support using
//! tokio synchronization primitives and LRU eviction policy.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use assigncache_core::cache::{pattern_matches, Cache, CacheError, Result};

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { value, expires_at }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() > exp)
    }
}

/// In-memory cache implementation with LRU eviction.
///
/// Thread-safe cache using `Arc<RwLock<LruCache>>` for concurrent access.
/// Supports TTL with lazy expiration: expired entries read as misses, are
/// skipped by `keys`, and are dropped the next time they are touched.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
    ttl: Option<Duration>,
}

impl MemoryCache {
    /// Creates a new in-memory cache with LRU eviction and no TTL.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::OperationFailed` if `max_entries` is 0.
    pub fn new(max_entries: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(max_entries).ok_or_else(|| {
            CacheError::OperationFailed("max_entries must be greater than zero".to_string())
        })?;
        Ok(Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
            ttl: None,
        })
    }

    /// Sets the time-to-live applied to every value stored from now on.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Returns the number of live (non-expired) entries.
    pub async fn len(&self) -> usize {
        let store = self.store.read().await;
        store.iter().filter(|(_, entry)| !entry.is_expired()).count()
    }

    /// Returns true if no live entries remain.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        // Write lock: LRU promotion mutates recency order.
        let mut store = self.store.write().await;

        let expired = match store.get(key) {
            Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };
        if expired {
            store.pop(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut store = self.store.write().await;
        store.put(key.to_string(), CacheEntry::new(value.to_vec(), self.ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut store = self.store.write().await;
        store.pop(key);
        Ok(())
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        let store = self.store.read().await;
        Ok(store
            .iter()
            .filter(|(key, entry)| !entry.is_expired() && pattern_matches(pattern, key))
            .map(|(key, _)| key.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Default max entries for tests
    const TEST_MAX_ENTRIES: usize = 1000;

    fn cache() -> MemoryCache {
        MemoryCache::new(TEST_MAX_ENTRIES).unwrap()
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = cache();

        cache.set("Assignment:1", b"value").await.unwrap();

        assert_eq!(
            cache.get("Assignment:1").await.unwrap(),
            Some(b"value".to_vec())
        );
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let cache = cache();
        assert_eq!(cache.get("Assignment:missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = cache();

        cache.set("Assignment:1", b"value").await.unwrap();
        cache.delete("Assignment:1").await.unwrap();

        assert!(cache.get("Assignment:1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_absent_key_succeeds() {
        let cache = cache();
        assert!(cache.delete("Assignment:never-set").await.is_ok());
    }

    #[tokio::test]
    async fn test_ttl_expiration() {
        let cache = cache().with_ttl(Duration::from_millis(50));

        cache.set("Assignment:ttl", b"short-lived").await.unwrap();
        assert!(cache.get("Assignment:ttl").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(cache.get("Assignment:ttl").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_keys_matches_pattern() {
        let cache = cache();

        cache.set("Assignment:GetByUser:U1:0:10", b"1").await.unwrap();
        cache.set("Assignment:GetByUser:U1:10:10", b"2").await.unwrap();
        cache.set("Assignment:GetByUser:U2:0:10", b"3").await.unwrap();
        cache.set("Issue:board", b"4").await.unwrap();

        let mut keys = cache.keys("Assignment:GetByUser:U1:*").await.unwrap();
        keys.sort();

        assert_eq!(
            keys,
            vec![
                "Assignment:GetByUser:U1:0:10".to_string(),
                "Assignment:GetByUser:U1:10:10".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_keys_no_matches() {
        let cache = cache();
        cache.set("Issue:board", b"1").await.unwrap();

        assert!(cache.keys("Document:*").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_keys_skips_expired() {
        let cache = cache().with_ttl(Duration::from_millis(20));
        cache.set("Issue:board", b"1").await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(cache.keys("Issue:*").await.unwrap().is_empty());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_overwrite_value() {
        let cache = cache();

        cache.set("Assignment:1", b"first").await.unwrap();
        cache.set("Assignment:1", b"second").await.unwrap();

        assert_eq!(
            cache.get("Assignment:1").await.unwrap(),
            Some(b"second".to_vec())
        );
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_lru_eviction() {
        let cache = MemoryCache::new(3).unwrap();

        cache.set("key1", b"value1").await.unwrap();
        cache.set("key2", b"value2").await.unwrap();
        cache.set("key3", b"value3").await.unwrap();

        // Access key1 to make it recently used
        cache.get("key1").await.unwrap();

        // Insert a 4th entry - should evict key2 (least recently used)
        cache.set("key4", b"value4").await.unwrap();

        assert!(cache.get("key1").await.unwrap().is_some());
        assert!(cache.get("key2").await.unwrap().is_none());
        assert!(cache.get("key3").await.unwrap().is_some());
        assert!(cache.get("key4").await.unwrap().is_some());
    }

    #[test]
    fn test_zero_max_entries_is_rejected() {
        assert!(matches!(
            MemoryCache::new(0),
            Err(CacheError::OperationFailed(_))
        ));
    }
}
