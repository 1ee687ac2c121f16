use std::{env, time::Duration};

use assigncache_core::cache::Result as CacheResult;

#[cfg(feature = "memory")]
use crate::cache::MemoryCache;
#[cfg(feature = "redis")]
use crate::cache::RedisCache;

/// Cache configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Cache TTL in seconds, 0 disables expiry (default: 300)
    pub cache_ttl_seconds: u64,
    /// Maximum number of in-memory cache entries (default: 10,000)
    pub cache_max_entries: usize,
    /// Per-call cache timeout in milliseconds (default: none)
    pub cache_timeout_ms: Option<u64>,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    pub redis_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 300)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10,000)
    /// - `CACHE_TIMEOUT_MS` - Per-call cache timeout (default: unset)
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            cache_ttl_seconds: lookup("CACHE_TTL_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            cache_max_entries: lookup("CACHE_MAX_ENTRIES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
            cache_timeout_ms: lookup("CACHE_TIMEOUT_MS").and_then(|v| v.parse().ok()),
            redis_url: lookup("REDIS_URL")
                .unwrap_or_else(|| "redis://localhost:6379".to_string()),
        }
    }

    /// Get cache TTL as a Duration. `None` means entries never expire.
    pub fn cache_ttl(&self) -> Option<Duration> {
        (self.cache_ttl_seconds > 0).then(|| Duration::from_secs(self.cache_ttl_seconds))
    }

    /// Get the per-call cache timeout, if one is configured.
    pub fn cache_timeout(&self) -> Option<Duration> {
        self.cache_timeout_ms.map(Duration::from_millis)
    }

    /// Builds an in-memory cache bounded by `cache_max_entries`, with the
    /// configured TTL.
    #[cfg(feature = "memory")]
    pub fn memory_cache(&self) -> CacheResult<MemoryCache> {
        let cache = MemoryCache::new(self.cache_max_entries)?;
        Ok(match self.cache_ttl() {
            Some(ttl) => cache.with_ttl(ttl),
            None => cache,
        })
    }

    /// Connects to `redis_url` and applies the configured TTL.
    #[cfg(feature = "redis")]
    pub async fn redis_cache(&self) -> CacheResult<RedisCache> {
        let cache = RedisCache::new(&self.redis_url).await?;
        Ok(match self.cache_ttl() {
            Some(ttl) => cache.with_ttl(ttl),
            None => cache,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
