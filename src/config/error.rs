//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid upstream base URL format")]
    InvalidUpstreamUrl,

    #[error("Upstream base URL must use HTTPS in production")]
    UpstreamMustBeHttps,

    #[error("Invalid upstream timeout")]
    InvalidUpstreamTimeout,

    #[error("Invalid filling session lifetime")]
    InvalidSessionTtl,

    #[error("Invalid session sweep interval")]
    InvalidSweepInterval,
}
