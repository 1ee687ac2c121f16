use async_trait::async_trait;

use super::Result;

/// Primitive operations of a key/value cache backend.
///
/// Values are opaque bytes; expiry policy belongs to the backend.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores a value under the key, replacing any previous value.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Deletes a value from the cache by key. Deleting an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Lists every key matching a glob pattern (e.g. `"Assignment:GetByUser:*"`).
    async fn keys(&self, pattern: &str) -> Result<Vec<String>>;
}
