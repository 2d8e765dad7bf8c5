use crate::errors::{AppError, Result};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub store: StoreConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    File,
    Redis,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub key_prefix: String,
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub redis_url: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            key_prefix: "rbac:".to_string(),
            data_dir: None,
            redis_url: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub log_format: String,
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: true,
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let environment = env::var("RBAC_ADMIN_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(
                config::File::with_name(&format!("config/{}", environment)).required(false),
            )
            // e.g., RBAC_ADMIN__STORE__BACKEND=redis
            .add_source(
                config::Environment::with_prefix("RBAC_ADMIN")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("store.backend", "file")?
            .set_default("store.data_dir", "data")?
            .set_default("store.key_prefix", "rbac:")?
            .set_default("observability.log_level", "info")?
            .set_default("observability.log_format", "pretty")?
            .set_default("observability.metrics_enabled", true)?
            .build()?;

        config
            .try_deserialize()
            .map_err(|e| AppError::Configuration(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.store.key_prefix.trim().is_empty() {
            return Err(AppError::Configuration(
                "Store key prefix must not be empty".to_string(),
            ));
        }

        match self.store.backend {
            StoreBackend::Memory => {}
            StoreBackend::File => {
                if self.store.data_dir.is_none() {
                    return Err(AppError::Configuration(
                        "data_dir is required for the file store backend".to_string(),
                    ));
                }
            }
            StoreBackend::Redis => {
                if self.store.redis_url.as_deref().map_or(true, str::is_empty) {
                    return Err(AppError::Configuration(
                        "redis_url is required for the redis store backend".to_string(),
                    ));
                }
            }
        }

        match self.observability.log_format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(AppError::Configuration(format!(
                "Unknown log format: {}",
                other
            ))),
        }
    }
}
