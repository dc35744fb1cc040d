// Key-value store abstraction backing the cache and rate limiter

use crate::errors::Result;
use async_trait::async_trait;

pub mod memory;
pub mod redis;

pub use self::memory::MemoryStore;
pub use self::redis::{create_client, health_check, RedisStore};

/// Trait for key-value store backends with per-key TTL support.
///
/// Values are JSON strings; typed access happens in the consumers.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under a key, if present and not expired
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value under a key, overwriting and resetting the TTL
    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<()>;

    /// Delete a key; deleting an absent key is a no-op
    async fn delete(&self, key: &str) -> Result<()>;

    /// List all live keys starting with the given prefix
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>>;
}
