//! Shared domain types and utilities for thriftmap.
//!
//! Holds the normalized store/category/neighborhood/region records every
//! other crate reads, the Haversine distance helper, the keyword-based
//! store classifier, and env-driven application configuration.

pub mod app_config;
pub mod classify;
pub mod config;
pub mod geo;
pub mod types;

use thiserror::Error;

pub use app_config::AppConfig;
pub use classify::{classify_store, KindStyle, StoreKind};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{distance_miles, Coordinate, DEFAULT_ZOOM, NYC_CENTER};
pub use types::{BlogPost, Category, City, Neighborhood, Region, Store, StoreMetrics};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
