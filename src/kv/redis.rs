use crate::config::RedisConfig;
use crate::errors::Result;
use crate::kv::KeyValueStore;
use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};

/// Create a Redis client and connection manager
pub async fn create_client(config: &RedisConfig) -> Result<ConnectionManager> {
    tracing::info!("Creating Redis client");

    let client = Client::open(config.url.as_str())?;

    let manager = ConnectionManager::new(client).await?;

    tracing::info!("Redis client connected");

    Ok(manager)
}

/// Health check for Redis connection
pub async fn health_check(manager: &mut ConnectionManager) -> Result<()> {
    let _: String = redis::cmd("PING").query_async(manager).await?;
    Ok(())
}

/// Redis-backed key-value store
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
}

impl RedisStore {
    pub fn new(manager: ConnectionManager) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<()> {
        let mut conn = self.manager.clone();
        let _: () = conn.set_ex(key, value, ttl_seconds).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.manager.clone();
        let _: () = conn.del(key).await?;
        Ok(())
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        let mut conn = self.manager.clone();
        let pattern = format!("{}*", prefix);

        let mut keys = Vec::new();
        let mut iter: redis::AsyncIter<String> = conn.scan_match(pattern).await?;
        while let Some(key) = iter.next_item().await {
            keys.push(key);
        }

        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: These tests require a running Redis instance
    #[tokio::test]
    #[ignore] // Requires Redis
    async fn test_redis_store_roundtrip() {
        let config = RedisConfig {
            url: "redis://localhost:6379".to_string(),
            pool_size: 10,
            connection_timeout_seconds: 5,
        };

        let manager = create_client(&config).await.unwrap();
        let store = RedisStore::new(manager);

        store.put("test:kv:roundtrip", "[1,2,3]", 60).await.unwrap();
        let value = store.get("test:kv:roundtrip").await.unwrap();
        assert_eq!(value.as_deref(), Some("[1,2,3]"));

        // Clean up
        store.delete("test:kv:roundtrip").await.unwrap();
        assert!(store.get("test:kv:roundtrip").await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore] // Requires Redis
    async fn test_redis_store_list_keys() {
        let config = RedisConfig {
            url: "redis://localhost:6379".to_string(),
            pool_size: 10,
            connection_timeout_seconds: 5,
        };

        let manager = create_client(&config).await.unwrap();
        let store = RedisStore::new(manager);

        store.put("test:kv:list:a", "1", 60).await.unwrap();
        store.put("test:kv:list:b", "2", 60).await.unwrap();

        let mut keys = store.list_keys("test:kv:list:").await.unwrap();
        keys.sort();
        assert_eq!(keys, vec!["test:kv:list:a", "test:kv:list:b"]);

        // Clean up
        store.delete("test:kv:list:a").await.unwrap();
        store.delete("test:kv:list:b").await.unwrap();
    }
}
