// Cache-aside helper over the key-value store

pub mod keys;

use crate::errors::Result;
use crate::kv::KeyValueStore;
use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;

/// Default TTL for cached values
pub const DEFAULT_TTL_SECONDS: u64 = 3600;

/// TTL used by `remember_forever`; one year
const FOREVER_TTL_SECONDS: u64 = 31_536_000;

/// Typed cache over a key-value store.
///
/// Values are stored as JSON; a miss and an expired entry are
/// indistinguishable to callers.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn KeyValueStore>,
}

impl Cache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Get a cached value
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Store a value with an explicit TTL
    pub async fn set<T: Serialize>(&self, key: &str, value: &T, ttl_seconds: u64) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.put(key, &raw, ttl_seconds).await
    }

    /// Remove a cached value
    pub async fn delete(&self, key: &str) -> Result<()> {
        self.store.delete(key).await
    }

    /// Invalidate every key under a prefix
    pub async fn invalidate_prefix(&self, prefix: &str) -> Result<()> {
        let keys = self.store.list_keys(prefix).await?;

        tracing::debug!(prefix = %prefix, count = %keys.len(), "Invalidating cache keys");

        try_join_all(keys.iter().map(|key| self.store.delete(key))).await?;
        Ok(())
    }

    /// Return the cached value under a key, or run the loader, cache its
    /// result with the given TTL and return it
    pub async fn remember<T, F, Fut>(&self, key: &str, ttl_seconds: u64, loader: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(cached) = self.get(key).await? {
            return Ok(cached);
        }

        let value = loader().await?;
        self.set(key, &value, ttl_seconds).await?;

        Ok(value)
    }

    /// `remember` with a TTL long enough to outlive any deploy
    pub async fn remember_forever<T, F, Fut>(&self, key: &str, loader: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.remember(key, FOREVER_TTL_SECONDS, loader).await
    }
}
