//! CRUD operations over users, roles and permissions.
//!
//! Every operation reads the whole collection from the store, applies its
//! change in memory and writes the whole collection back. Results are wrapped
//! in an [`ApiResponse`]. The only modeled failure is `update` on an unknown
//! id, which returns [`AppError::NotFound`] without touching the collection;
//! `delete` of an unknown id succeeds as a no-op.

pub mod dashboard;
pub mod ids;
pub mod permissions;
pub mod roles;
pub mod users;

pub use dashboard::DashboardStats;

use crate::clock::{Clock, SystemClock};
use crate::domain::{ApiResponse, Record};
use crate::errors::{AppError, Result};
use crate::observability::MetricsRecorder;
use crate::store::{CollectionStore, KeyValueStore, MemoryStore};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Entry point for all record operations; cheap to clone
#[derive(Clone)]
pub struct AdminApi {
    store: CollectionStore,
}

impl AdminApi {
    pub fn new(store: CollectionStore) -> Self {
        Self { store }
    }

    /// API over a fresh in-memory store using the system clock
    pub fn in_memory() -> Self {
        Self::with_backend(Arc::new(MemoryStore::new()), "rbac:", Arc::new(SystemClock))
    }

    pub fn with_backend(
        backend: Arc<dyn KeyValueStore>,
        key_prefix: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::new(CollectionStore::new(backend, key_prefix, clock))
    }

    pub fn store(&self) -> &CollectionStore {
        &self.store
    }

    /// Drop all collections so the next access re-seeds them
    pub async fn reset(&self) -> Result<ApiResponse<()>> {
        self.store.reset().await?;
        Ok(ApiResponse::ok((), "Store reset successfully"))
    }

    async fn list_records<R: Record>(&self) -> Result<Vec<R>> {
        let start = Instant::now();
        let result = self.store.read::<R>().await;
        observe::<R, _>("list", start, &result);
        result
    }

    async fn create_record<R: Record>(&self, new: R::New) -> Result<R> {
        let start = Instant::now();
        let result = async {
            let mut records = self.store.read::<R>().await?;
            let record = R::create(ids::generate_id(), new, self.store.now());
            records.push(record.clone());
            self.store.write(&records).await?;
            debug!(entity = R::ENTITY, id = record.id(), "Record created");
            Ok::<_, AppError>(record)
        }
        .await;
        observe::<R, _>("create", start, &result);
        result
    }

    async fn update_record<R: Record>(&self, id: &str, patch: R::Patch) -> Result<R> {
        let start = Instant::now();
        let result = async {
            let mut records = self.store.read::<R>().await?;
            let record = records
                .iter_mut()
                .find(|r| r.id() == id)
                .ok_or_else(|| AppError::not_found(R::ENTITY, id))?;
            record.apply(patch, self.store.now());
            let updated = record.clone();
            self.store.write(&records).await?;
            debug!(entity = R::ENTITY, id, "Record updated");
            Ok::<_, AppError>(updated)
        }
        .await;
        observe::<R, _>("update", start, &result);
        result
    }

    /// Returns whether a record was removed
    async fn delete_record<R: Record>(&self, id: &str) -> Result<bool> {
        let start = Instant::now();
        let result = async {
            let mut records = self.store.read::<R>().await?;
            let before = records.len();
            records.retain(|r| r.id() != id);
            let removed = records.len() != before;
            self.store.write(&records).await?;
            debug!(entity = R::ENTITY, id, removed, "Record delete");
            Ok::<_, AppError>(removed)
        }
        .await;
        observe::<R, _>("delete", start, &result);
        result
    }
}

impl Default for AdminApi {
    fn default() -> Self {
        Self::in_memory()
    }
}

fn observe<R: Record, T>(operation: &str, start: Instant, result: &Result<T>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    MetricsRecorder::record_operation(R::ENTITY, operation, outcome);
    MetricsRecorder::record_operation_duration(
        R::ENTITY,
        operation,
        start.elapsed().as_secs_f64(),
    );
}
