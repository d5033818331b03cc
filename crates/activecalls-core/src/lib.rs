//! Shared domain types and configuration for the active-calls incident mapper.

pub mod app_config;
pub mod config;
pub mod incident;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use incident::{Coordinates, Incident, IncidentRow};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
