//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use shaku::Interface;
use std::time::Duration;
use tracing::warn;
use veris_core::VerisResult;

/// Cache interface for storing and retrieving cached data.
///
/// This trait provides an abstraction over caching implementations,
/// allowing for easy swapping between Redis, in-memory, or other cache
/// backends. Cache entries are non-authoritative: the whole keyspace may
/// be flushed without data loss.
///
/// Uses JSON strings for type-erased storage to maintain dyn-compatibility.
#[async_trait]
pub trait CacheInterface: Interface + Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> VerisResult<Option<String>>;

    /// Set a raw JSON value in the cache with a TTL.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> VerisResult<()>;

    /// Delete a value from the cache.
    ///
    /// Returns `true` if the key existed and was deleted.
    async fn delete(&self, key: &str) -> VerisResult<bool>;

    /// Check if a key exists in the cache.
    async fn exists(&self, key: &str) -> VerisResult<bool>;

    /// Delete multiple keys matching a glob pattern.
    ///
    /// Returns the number of keys deleted. Used for invalidation scoped
    /// to one member (`*:<member>:*`) or one coverage (`*:<coverage>`).
    async fn delete_pattern(&self, pattern: &str) -> VerisResult<u64>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Extension trait with typed methods for convenience.
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Get a typed value from the cache.
    ///
    /// A deserialization failure is treated as a miss, not an error: the
    /// corrupted entry is simply overwritten on the next write.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> VerisResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => match serde_json::from_str(&json) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    warn!("Corrupted cache entry for key '{}', treating as miss: {}", key, e);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Set a typed value in the cache.
    async fn set<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> VerisResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }
}

// Blanket implementation for all CacheInterface implementations
impl<T: CacheInterface + ?Sized> CacheExt for T {}
