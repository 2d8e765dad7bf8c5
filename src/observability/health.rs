use crate::store::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthChecks {
    pub store: ComponentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentStatus {
    pub status: String,
    pub backend: String,
    pub message: Option<String>,
}

pub struct HealthChecker {
    store: Arc<dyn KeyValueStore>,
}

impl HealthChecker {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Readiness check - is the store reachable?
    pub async fn readiness(&self) -> HealthStatus {
        let store_status = self.check_store().await;

        let overall_status = if store_status.status == "ok" {
            "ok"
        } else {
            "degraded"
        };

        HealthStatus {
            status: overall_status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            checks: HealthChecks {
                store: store_status,
            },
        }
    }

    async fn check_store(&self) -> ComponentStatus {
        let backend = self.store.backend_name().to_string();
        match self.store.health_check().await {
            Ok(_) => ComponentStatus {
                status: "ok".to_string(),
                backend,
                message: None,
            },
            Err(e) => ComponentStatus {
                status: "error".to_string(),
                backend,
                message: Some(format!("Store check failed: {}", e)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{AppError, Result};
    use crate::store::MemoryStore;
    use async_trait::async_trait;

    struct UnreachableStore;

    #[async_trait]
    impl KeyValueStore for UnreachableStore {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(AppError::Internal("unreachable".to_string()))
        }
        async fn set(&self, _key: &str, _value: String) -> Result<()> {
            Err(AppError::Internal("unreachable".to_string()))
        }
        async fn remove(&self, _key: &str) -> Result<()> {
            Err(AppError::Internal("unreachable".to_string()))
        }
        async fn health_check(&self) -> Result<()> {
            Err(AppError::Internal("unreachable".to_string()))
        }
        fn backend_name(&self) -> &'static str {
            "unreachable"
        }
    }

    #[tokio::test]
    async fn test_ready_with_memory_store() {
        let checker = HealthChecker::new(Arc::new(MemoryStore::new()));
        let status = checker.readiness().await;
        assert_eq!(status.status, "ok");
        assert_eq!(status.checks.store.backend, "memory");
    }

    #[tokio::test]
    async fn test_degraded_when_store_fails() {
        let checker = HealthChecker::new(Arc::new(UnreachableStore));
        let status = checker.readiness().await;
        assert_eq!(status.status, "degraded");
        assert!(status.checks.store.message.unwrap().contains("unreachable"));
    }
}
