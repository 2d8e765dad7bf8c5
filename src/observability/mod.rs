//! Logging, metrics and store health reporting.

pub mod health;
pub mod metrics;
pub mod tracing;

pub use health::{HealthChecker, HealthStatus};
pub use metrics::MetricsRecorder;
pub use tracing::init_tracing;
