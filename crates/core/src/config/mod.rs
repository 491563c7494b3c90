//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (RICHLINKER_*)
//! 2. TOML config file (if RICHLINKER_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::cache::{DEFAULT_CACHE_KEY, DEFAULT_TTL_MS};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (RICHLINKER_*)
/// 2. TOML config file (if RICHLINKER_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite scratch database holding the cycle entry.
    ///
    /// Set via RICHLINKER_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Keep the cycle entry in memory instead of SQLite.
    ///
    /// Set via RICHLINKER_EPHEMERAL_STORE environment variable.
    #[serde(default)]
    pub ephemeral_store: bool,

    /// Scratch-store key for the cycle entry.
    #[serde(default = "default_cache_key")]
    pub cache_key: String,

    /// Window in milliseconds in which a repeat invocation cycles formats.
    ///
    /// Set via RICHLINKER_CYCLE_TTL_MS environment variable.
    #[serde(default = "default_cycle_ttl_ms")]
    pub cycle_ttl_ms: u64,

    /// How long a notification stays visible, in milliseconds.
    ///
    /// Set via RICHLINKER_NOTICE_MS environment variable.
    #[serde(default = "default_notice_ms")]
    pub notice_ms: u64,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./richlinker-scratch.sqlite")
}

fn default_cache_key() -> String {
    DEFAULT_CACHE_KEY.into()
}

fn default_cycle_ttl_ms() -> u64 {
    DEFAULT_TTL_MS as u64
}

fn default_notice_ms() -> u64 {
    1_500
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            ephemeral_store: false,
            cache_key: default_cache_key(),
            cycle_ttl_ms: default_cycle_ttl_ms(),
            notice_ms: default_notice_ms(),
        }
    }
}

impl AppConfig {
    /// Notification display time as Duration.
    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `RICHLINKER_`
    /// 2. TOML file from `RICHLINKER_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("RICHLINKER_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("RICHLINKER_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.db_path, PathBuf::from("./richlinker-scratch.sqlite"));
        assert!(!config.ephemeral_store);
        assert_eq!(config.cache_key, "richlinker-last-copy");
        assert_eq!(config.cycle_ttl_ms, 1_000);
        assert_eq!(config.notice_ms, 1_500);
    }

    #[test]
    fn test_notice_duration() {
        let config = AppConfig::default();
        assert_eq!(config.notice_duration(), Duration::from_millis(1_500));
    }

    #[test]
    fn test_load_from_toml_and_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("richlinker.toml", "cycle_ttl_ms = 2000\nnotice_ms = 900\n")?;
            jail.set_env("RICHLINKER_CONFIG_FILE", "richlinker.toml");
            jail.set_env("RICHLINKER_NOTICE_MS", "700");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.cycle_ttl_ms, 2_000);
            assert_eq!(config.notice_ms, 700);
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("RICHLINKER_CYCLE_TTL_MS", "5");
            assert!(matches!(AppConfig::load(), Err(ConfigError::Invalid { .. })));
            Ok(())
        });
    }
}
