//! Key/value persistence for the record collections.
//!
//! Backends only move opaque strings. `CollectionStore` layers the typed,
//! seed-on-first-read collection semantics on top of whichever backend is
//! configured.

pub mod collections;
pub mod file;
pub mod memory;
pub mod redis;

pub use collections::CollectionStore;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use self::redis::RedisStore;

use crate::config::{StoreBackend, StoreConfig};
use crate::errors::{AppError, Result};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: String) -> Result<()>;
    /// Removing an absent key is not an error
    async fn remove(&self, key: &str) -> Result<()>;
    async fn health_check(&self) -> Result<()>;
    fn backend_name(&self) -> &'static str;
}

/// Build the backend selected by configuration
pub async fn open(config: &StoreConfig) -> Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match config.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::File => {
            let dir = config.data_dir.as_ref().ok_or_else(|| {
                AppError::Configuration("data_dir is required for the file store backend".to_string())
            })?;
            Arc::new(FileStore::open(dir).await?)
        }
        StoreBackend::Redis => {
            let url = config.redis_url.as_deref().ok_or_else(|| {
                AppError::Configuration("redis_url is required for the redis store backend".to_string())
            })?;
            Arc::new(RedisStore::connect(url).await?)
        }
    };

    tracing::info!(backend = store.backend_name(), "Store opened");
    Ok(store)
}
