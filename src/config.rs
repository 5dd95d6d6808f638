// src/config.rs

//! Application configuration structures.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP client behavior settings
    #[serde(default)]
    pub client: ClientConfig,

    /// Cache freshness and refresh settings
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.client.user_agent.trim().is_empty() {
            return Err(Error::config("client.user_agent is empty"));
        }
        if self.client.timeout_secs == 0 {
            return Err(Error::config("client.timeout_secs must be > 0"));
        }
        self.cache.validate()
    }
}

/// HTTP client behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Referer header sent with every request
    #[serde(default = "defaults::referer")]
    pub referer: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            referer: defaults::referer(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Cache freshness and background refresh settings.
///
/// The freshness threshold must exceed the auto-refresh window, otherwise
/// every on-demand read would race a needless fetch against the sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum age of cached data servable without a fetch, in seconds
    #[serde(default = "defaults::freshness")]
    pub freshness_secs: u64,

    /// Age at which the background sweep refreshes an entry, in seconds
    #[serde(default = "defaults::auto_refresh")]
    pub auto_refresh_secs: u64,

    /// Events not requested for this long are skipped by the sweep, in seconds
    #[serde(default = "defaults::inactivity_cutoff")]
    pub inactivity_cutoff_secs: u64,

    /// Interval between background sweep ticks, in seconds
    #[serde(default = "defaults::sweep_tick")]
    pub sweep_tick_secs: u64,

    /// Path of the persisted cache snapshot
    #[serde(default = "defaults::snapshot_path")]
    pub snapshot_path: String,
}

impl CacheConfig {
    /// Validate cache settings.
    pub fn validate(&self) -> Result<()> {
        if self.freshness_secs <= self.auto_refresh_secs {
            return Err(Error::config(
                "cache.freshness_secs must be greater than cache.auto_refresh_secs",
            ));
        }
        if self.sweep_tick_secs == 0 {
            return Err(Error::config("cache.sweep_tick_secs must be > 0"));
        }
        Ok(())
    }

    pub fn freshness(&self) -> Duration {
        Duration::from_secs(self.freshness_secs)
    }

    pub fn auto_refresh(&self) -> Duration {
        Duration::from_secs(self.auto_refresh_secs)
    }

    pub fn inactivity_cutoff(&self) -> Duration {
        Duration::from_secs(self.inactivity_cutoff_secs)
    }

    pub fn sweep_tick(&self) -> Duration {
        Duration::from_secs(self.sweep_tick_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            freshness_secs: defaults::freshness(),
            auto_refresh_secs: defaults::auto_refresh(),
            inactivity_cutoff_secs: defaults::inactivity_cutoff(),
            sweep_tick_secs: defaults::sweep_tick(),
            snapshot_path: defaults::snapshot_path(),
        }
    }
}

mod defaults {
    // Client defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/137.0.0.0 Safari/537.36".into()
    }
    pub fn referer() -> String {
        "https://devpost.com/".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Cache defaults
    pub fn freshness() -> u64 {
        300
    }
    pub fn auto_refresh() -> u64 {
        60
    }
    pub fn inactivity_cutoff() -> u64 {
        4 * 3600
    }
    pub fn sweep_tick() -> u64 {
        1
    }
    pub fn snapshot_path() -> String {
        "cache.json".into()
    }
}
