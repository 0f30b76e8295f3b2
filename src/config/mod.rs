//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `FEEDBACK_FORMS` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use feedback_forms::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod error;
mod server;
mod sessions;
mod upstream;

pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use sessions::SessionConfig;
pub use upstream::UpstreamConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream forms API
    pub upstream: UpstreamConfig,

    /// Filling session lifetime
    #[serde(default)]
    pub sessions: SessionConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `FEEDBACK_FORMS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `FEEDBACK_FORMS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `FEEDBACK_FORMS__UPSTREAM__BASE_URL=...` -> `upstream.base_url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FEEDBACK_FORMS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.upstream.validate(&self.server.environment)?;
        self.sessions.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("FEEDBACK_FORMS__UPSTREAM__BASE_URL", "http://localhost:8000/api");
    }

    fn clear_env() {
        env::remove_var("FEEDBACK_FORMS__UPSTREAM__BASE_URL");
        env::remove_var("FEEDBACK_FORMS__UPSTREAM__TIMEOUT_SECS");
        env::remove_var("FEEDBACK_FORMS__SERVER__PORT");
        env::remove_var("FEEDBACK_FORMS__SERVER__ENVIRONMENT");
        env::remove_var("FEEDBACK_FORMS__SESSIONS__IDLE_TTL_MINS");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.upstream.base_url, "http://localhost:8000/api");
        assert_eq!(config.server.port, 8080);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("FEEDBACK_FORMS__SERVER__PORT", "9090");
        env::set_var("FEEDBACK_FORMS__UPSTREAM__TIMEOUT_SECS", "5");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.upstream.timeout_secs, 5);
    }

    #[test]
    fn test_session_lifetime_override() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("FEEDBACK_FORMS__SESSIONS__IDLE_TTL_MINS", "15");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.sessions.idle_ttl_mins, 15);
        assert_eq!(config.sessions.sweep_interval_secs, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_upstream_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_production_rejects_plain_http_upstream() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("FEEDBACK_FORMS__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert!(matches!(
            config.validate(),
            Err(ValidationError::UpstreamMustBeHttps)
        ));
    }
}
