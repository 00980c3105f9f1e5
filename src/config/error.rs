//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::membership::RegistryError;

/// Errors that can occur during configuration loading
///
/// Every variant is fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Failed to read tier table {path}: {source}")]
    TierTableRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse tier table: {0}")]
    TierTableParse(#[from] serde_yaml::Error),

    #[error("Invalid tier table: {0}")]
    Registry(#[from] RegistryError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddr(String),
}
