//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `cycle_ttl_ms` is outside 100ms..=60s
    /// - `notice_ms` is outside 100ms..=30s
    /// - `cache_key` is empty
    /// - `db_path` is empty while the SQLite store is in use
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(100..=60_000).contains(&self.cycle_ttl_ms) {
            return Err(ConfigError::Invalid {
                field: "cycle_ttl_ms".into(),
                reason: "must be between 100ms and 60000ms".into(),
            });
        }

        if !(100..=30_000).contains(&self.notice_ms) {
            return Err(ConfigError::Invalid {
                field: "notice_ms".into(),
                reason: "must be between 100ms and 30000ms".into(),
            });
        }

        if self.cache_key.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "cache_key".into(), reason: "must not be empty".into() });
        }

        if !self.ephemeral_store && self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                field: "db_path".into(),
                reason: "must not be empty unless ephemeral_store is set".into(),
            });
        }

        if self.cycle_ttl_ms > 5_000 {
            tracing::warn!(
                cycle_ttl_ms = self.cycle_ttl_ms,
                "long cycle window; unrelated copies of the same page will keep cycling"
            );
        }

        Ok(())
    }
}
