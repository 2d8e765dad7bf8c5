//! Typed access to the three record collections.
//!
//! Each collection is one key holding a JSON array. Reads always deserialize
//! the whole array and writes always replace it; there is no partial update
//! and no isolation between a read and the write that follows it. Callers are
//! expected to be a single logical consumer.
//!
//! The first read that finds a key missing seeds every absent collection from
//! one [`SeedData`], so the snapshots embedded in seeded users and roles are
//! equal to the seeded roles and permissions. There is no schema version in the
//! stored layout; [`CollectionStore::reset`] drops all keys so the next read
//! re-seeds.

use super::KeyValueStore;
use crate::clock::Clock;
use crate::domain::{Collection, Permission, Record, Role, User};
use crate::errors::Result;
use crate::observability::MetricsRecorder;
use crate::seed::SeedData;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct CollectionStore {
    backend: Arc<dyn KeyValueStore>,
    key_prefix: String,
    clock: Arc<dyn Clock>,
}

impl CollectionStore {
    pub fn new(
        backend: Arc<dyn KeyValueStore>,
        key_prefix: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            backend,
            key_prefix: key_prefix.into(),
            clock,
        }
    }

    pub fn key(&self, collection: Collection) -> String {
        format!("{}{}", self.key_prefix, collection.as_str())
    }

    pub fn backend(&self) -> &Arc<dyn KeyValueStore> {
        &self.backend
    }

    /// Current time from the store's clock
    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    /// Read every record of `R`'s collection, seeding it if absent
    pub async fn read<R: Record>(&self) -> Result<Vec<R>> {
        let collection = R::COLLECTION;
        let raw = match self.backend.get(&self.key(collection)).await? {
            Some(raw) => raw,
            None => self.seed(collection).await?,
        };
        let records: Vec<R> = serde_json::from_str(&raw)?;
        MetricsRecorder::set_records(collection.as_str(), records.len());
        debug!(%collection, count = records.len(), "Collection read");
        Ok(records)
    }

    /// Replace the whole collection of `R`
    pub async fn write<R: Record>(&self, records: &[R]) -> Result<()> {
        let collection = R::COLLECTION;
        let raw = serde_json::to_string(records)?;
        self.backend.set(&self.key(collection), raw).await?;
        MetricsRecorder::set_records(collection.as_str(), records.len());
        debug!(%collection, count = records.len(), "Collection written");
        Ok(())
    }

    /// Drop all stored collections; the next read of each re-seeds it
    pub async fn reset(&self) -> Result<()> {
        for collection in Collection::ALL {
            self.backend.remove(&self.key(collection)).await?;
        }
        info!(backend = self.backend.backend_name(), "Store reset");
        Ok(())
    }

    /// Read every collection once so the record gauges reflect stored state
    pub async fn refresh_record_counts(&self) -> Result<()> {
        self.read::<User>().await?;
        self.read::<Role>().await?;
        self.read::<Permission>().await?;
        Ok(())
    }

    /// Seed `requested` and every other absent collection from one dataset
    async fn seed(&self, requested: Collection) -> Result<String> {
        let seed = SeedData::at(self.clock.now());
        let raw = self.store_seed(&seed, requested).await?;
        for collection in Collection::ALL {
            if collection != requested
                && self.backend.get(&self.key(collection)).await?.is_none()
            {
                self.store_seed(&seed, collection).await?;
            }
        }
        Ok(raw)
    }

    async fn store_seed(&self, seed: &SeedData, collection: Collection) -> Result<String> {
        let (raw, count) = match collection {
            Collection::Users => (serde_json::to_string(&seed.users)?, seed.users.len()),
            Collection::Roles => (serde_json::to_string(&seed.roles)?, seed.roles.len()),
            Collection::Permissions => (
                serde_json::to_string(&seed.permissions)?,
                seed.permissions.len(),
            ),
        };
        self.backend.set(&self.key(collection), raw.clone()).await?;
        MetricsRecorder::set_records(collection.as_str(), count);
        info!(%collection, count, "Seeded collection");
        Ok(raw)
    }
}
