//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SIGNALFIRE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use signalfire_membership::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! let registry = config.tiers.load_registry().expect("Invalid tier table");
//! ```

mod error;
mod features;
mod server;
mod tiers;

pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use server::{Environment, ServerConfig};
pub use tiers::{builtin_tier_table, TierConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development configuration with the built-in tier table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Tier table source
    #[serde(default)]
    pub tiers: TierConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SIGNALFIRE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SIGNALFIRE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `SIGNALFIRE__TIERS__TABLE_PATH=/etc/signalfire/tiers.yaml` -> `tiers.table_path`
    /// - `SIGNALFIRE__FEATURES__JSON_LOGS=true` -> `features.json_logs = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SIGNALFIRE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// The tier table is validated separately by `TierConfig::load_registry`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("SIGNALFIRE__SERVER__PORT");
        env::remove_var("SIGNALFIRE__SERVER__ENVIRONMENT");
        env::remove_var("SIGNALFIRE__TIERS__TABLE_PATH");
        env::remove_var("SIGNALFIRE__FEATURES__JSON_LOGS");
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert!(config.tiers.table_path.is_none());
        assert!(config.features.enable_tracing);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SIGNALFIRE__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.server.is_production());
        assert!(!config.server.allows_any_origin());
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SIGNALFIRE__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_tier_table_path_and_flags() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SIGNALFIRE__TIERS__TABLE_PATH", "/etc/signalfire/tiers.yaml");
        env::set_var("SIGNALFIRE__FEATURES__JSON_LOGS", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.tiers.table_path,
            Some(PathBuf::from("/etc/signalfire/tiers.yaml"))
        );
        assert!(config.features.json_logs);
    }

    #[test]
    fn test_invalid_port_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SIGNALFIRE__SERVER__PORT", "0");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(config.validate(), Err(ValidationError::InvalidPort)));
    }
}
