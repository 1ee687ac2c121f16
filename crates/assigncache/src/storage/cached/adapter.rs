//! Typed access to a cache backend.
//!
//! Wraps a raw `Cache` with JSON (de)serialization, an optional per-call
//! timeout, and tracing spans. Backend failures are categorized by the
//! operation that hit them: `CacheRead`, `CacheWrite` or `CacheDelete`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::Instrument;

use assigncache_core::cache::{
    deserialize_value, serialize_value, Cache, CacheError, Result as CacheResult,
};
use assigncache_core::storage::{RepositoryError, Result};

/// Typed wrapper over a cache backend.
pub struct CacheAdapter<C: Cache> {
    cache: Arc<C>,
    timeout: Option<Duration>,
}

impl<C: Cache> Clone for CacheAdapter<C> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            timeout: self.timeout,
        }
    }
}

impl<C: Cache> CacheAdapter<C> {
    pub fn new(cache: Arc<C>) -> Self {
        Self {
            cache,
            timeout: None,
        }
    }

    /// Bounds every backend call by `timeout`. Elapsed calls fail with
    /// `CacheError::Timeout`, categorized like any other failure of that call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    async fn run<T, F>(&self, call: F) -> CacheResult<T>
    where
        F: Future<Output = CacheResult<T>> + Send,
    {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or(Err(CacheError::Timeout(limit))),
            None => call.await,
        }
    }

    /// Reads and deserializes the value under `key`. A miss is `Ok(None)`.
    pub async fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let span = tracing::info_span!("cache.get", cache.key = %key);
        async {
            let bytes = self.run(self.cache.get(key)).await.map_err(|err| {
                tracing::warn!(key = %key, error = %err, "Cache read failed");
                RepositoryError::CacheRead(err)
            })?;

            let Some(bytes) = bytes else {
                return Ok(None);
            };

            deserialize_value(&bytes).map(Some).map_err(|err| {
                tracing::warn!(key = %key, error = %err, "Cached value deserialization failed");
                RepositoryError::CacheRead(CacheError::Serialization(err.to_string()))
            })
        }
        .instrument(span)
        .await
    }

    /// Serializes and stores `value` under `key`.
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + Sync + ?Sized,
    {
        let span = tracing::info_span!("cache.set", cache.key = %key);
        async {
            let bytes = serialize_value(value).map_err(|err| {
                tracing::warn!(key = %key, error = %err, "Cache value serialization failed");
                RepositoryError::CacheWrite(CacheError::Serialization(err.to_string()))
            })?;

            self.run(self.cache.set(key, &bytes)).await.map_err(|err| {
                tracing::warn!(key = %key, error = %err, "Cache write failed");
                RepositoryError::CacheWrite(err)
            })
        }
        .instrument(span)
        .await
    }

    /// Removes the entry under `key`. Removing an absent key succeeds.
    pub async fn delete(&self, key: &str) -> Result<()> {
        let span = tracing::info_span!("cache.delete", cache.key = %key);
        async {
            self.run(self.cache.delete(key)).await.map_err(|err| {
                tracing::warn!(key = %key, error = %err, "Cache delete failed");
                RepositoryError::CacheDelete(err)
            })
        }
        .instrument(span)
        .await
    }

    /// Deletes every key matching the glob `pattern`.
    ///
    /// Stops at the first failing per-key delete; keys after it are left in
    /// place. Deletes are idempotent, so the caller can simply retry.
    pub async fn delete_pattern(&self, pattern: &str) -> Result<()> {
        let span = tracing::info_span!("cache.delete_pattern", cache.pattern = %pattern);
        async {
            let keys = self.run(self.cache.keys(pattern)).await.map_err(|err| {
                tracing::warn!(pattern = %pattern, error = %err, "Cache key scan failed");
                RepositoryError::CacheDelete(err)
            })?;

            for key in &keys {
                self.run(self.cache.delete(key)).await.map_err(|err| {
                    tracing::warn!(
                        pattern = %pattern,
                        key = %key,
                        error = %err,
                        "Cache delete failed during pattern delete"
                    );
                    RepositoryError::CacheDelete(err)
                })?;
            }

            tracing::trace!(pattern = %pattern, count = keys.len(), "Pattern delete completed");
            Ok(())
        }
        .instrument(span)
        .await
    }
}
