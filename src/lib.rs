// RBAC administration library

pub mod api;
pub mod cli;
pub mod clock;
pub mod config;
pub mod domain;
pub mod errors;
pub mod observability;
pub mod seed;
pub mod store;

pub use api::AdminApi;
pub use config::Config;
pub use errors::{AppError, Result};
