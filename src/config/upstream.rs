//! Upstream forms API configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;
use crate::adapters::rest::RestApiConfig;

/// Upstream forms API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the forms API, e.g. `https://forms.example.com/api`
    pub base_url: String,

    /// Bearer token for authoring requests (create/update)
    pub api_token: Option<Secret<String>>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Client configuration for the REST adapter
    pub fn rest_api_config(&self) -> RestApiConfig {
        let config = RestApiConfig::new(self.base_url.clone()).with_timeout(self.timeout());
        match &self.api_token {
            Some(token) => config.with_api_token(token.clone()),
            None => config,
        }
    }

    /// Validate upstream configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("UPSTREAM__BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidUpstreamUrl);
        }
        if *environment == Environment::Production && !self.base_url.starts_with("https://") {
            return Err(ValidationError::UpstreamMustBeHttps);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidUpstreamTimeout);
        }
        Ok(())
    }
}

fn default_timeout() -> u64 {
    30
}
