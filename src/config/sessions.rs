//! Lifetime of in-memory filling sessions.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Sessions started longer ago than this are discarded.
    pub idle_ttl_mins: i64,
    /// How often the sweeper looks for expired sessions.
    pub sweep_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_ttl_mins: 120,
            sweep_interval_secs: 60,
        }
    }
}

impl SessionConfig {
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=7 * 24 * 60).contains(&self.idle_ttl_mins) {
            return Err(ValidationError::InvalidSessionTtl);
        }
        if !(1..=3600).contains(&self.sweep_interval_secs) {
            return Err(ValidationError::InvalidSweepInterval);
        }
        Ok(())
    }
}
