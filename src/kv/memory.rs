use crate::errors::Result;
use crate::kv::KeyValueStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// In-memory key-value store with honored TTLs.
///
/// Used by tests and local development; expired entries are dropped lazily
/// on access rather than by a background sweep.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

struct Entry {
    value: String,
    expires_at: Instant,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.entries.lock().await;

        if let Some(entry) = entries.get(key) {
            if entry.expires_at > Instant::now() {
                return Ok(Some(entry.value.clone()));
            }
            entries.remove(key);
        }

        Ok(None)
    }

    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + Duration::from_secs(ttl_seconds),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().await;
        entries.remove(key);
        Ok(())
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        entries.retain(|_, entry| entry.expires_at > now);

        Ok(entries
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let store = MemoryStore::new();

        store.put("key", "value", 60).await.unwrap();
        assert_eq!(store.get("key").await.unwrap().as_deref(), Some("value"));
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = MemoryStore::new();
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites_and_resets_ttl() {
        let store = MemoryStore::new();

        store.put("key", "old", 60).await.unwrap();
        store.put("key", "new", 60).await.unwrap();
        assert_eq!(store.get("key").await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_ttl_expiry() {
        let store = MemoryStore::new();

        store.put("key", "value", 1).await.unwrap();
        assert!(store.get("key").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(store.get("key").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();

        store.put("key", "value", 60).await.unwrap();
        store.delete("key").await.unwrap();
        assert!(store.get("key").await.unwrap().is_none());

        // Deleting an absent key is a no-op
        store.delete("key").await.unwrap();
    }

    #[tokio::test]
    async fn test_list_keys_filters_by_prefix() {
        let store = MemoryStore::new();

        store.put("products:1", "a", 60).await.unwrap();
        store.put("products:2", "b", 60).await.unwrap();
        store.put("orders:1", "c", 60).await.unwrap();

        let mut keys = store.list_keys("products:").await.unwrap();
        keys.sort();
        assert_eq!(keys, vec!["products:1", "products:2"]);
    }

    #[tokio::test]
    async fn test_list_keys_skips_expired_entries() {
        let store = MemoryStore::new();

        store.put("products:1", "a", 1).await.unwrap();
        store.put("products:2", "b", 60).await.unwrap();

        tokio::time::sleep(Duration::from_millis(1100)).await;

        let keys = store.list_keys("products:").await.unwrap();
        assert_eq!(keys, vec!["products:2"]);
    }
}
