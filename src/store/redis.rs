use super::KeyValueStore;
use crate::errors::Result;
use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};

/// Redis-backed key/value store
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
}

impl RedisStore {
    /// Create a Redis client and connection manager
    pub async fn connect(url: &str) -> Result<Self> {
        tracing::info!("Creating Redis client");

        let client = Client::open(url)?;
        let manager = ConnectionManager::new(client).await?;

        tracing::info!("Redis client connected");

        Ok(Self { manager })
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut manager = self.manager.clone();
        let value: Option<String> = manager.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut manager = self.manager.clone();
        let _: () = manager.set(key, value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut manager = self.manager.clone();
        let _: () = manager.del(key).await?;
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        let mut manager = self.manager.clone();
        let _: String = redis::cmd("PING").query_async(&mut manager).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
