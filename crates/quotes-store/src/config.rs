use std::fs;
use std::path::Path;
use std::time::Duration;

use quotes_core::{
    DEFAULT_BATCH_LIMIT, DEFAULT_SERVER_CATEGORY, DEFAULT_SERVER_URL, DEFAULT_STATUS_TTL_SECS,
    DEFAULT_SYNC_INTERVAL_SECS,
};
use serde::Deserialize;

use crate::error::{Result, StoreError};

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Optional `<data_dir>/config.toml`. Every field has a default, so a missing
/// file or a partial one is fine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    pub sync_interval_secs: u64,
    pub batch_limit: usize,
    pub server_category: String,
    pub status_ttl_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            sync_interval_secs: DEFAULT_SYNC_INTERVAL_SECS,
            batch_limit: DEFAULT_BATCH_LIMIT,
            server_category: DEFAULT_SERVER_CATEGORY.to_string(),
            status_ttl_secs: DEFAULT_STATUS_TTL_SECS,
            request_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load `config.toml` from `base_dir`, or defaults if it does not exist.
    pub fn load(base_dir: &Path) -> Result<Self> {
        Self::load_from(&base_dir.join(CONFIG_FILE_NAME))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|e| {
            StoreError::InvalidData(format!("failed to read {}: {e}", path.display()))
        })?;
        let config: Config = toml::from_str(&contents).map_err(|e| {
            StoreError::InvalidData(format!("failed to parse {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides (`QUOTES_SERVER_URL`).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("QUOTES_SERVER_URL")
            && !url.trim().is_empty()
        {
            self.server_url = url;
        }
        self
    }

    fn validate(&self) -> Result<()> {
        if self.sync_interval_secs == 0 {
            return Err(StoreError::InvalidData(
                "sync_interval_secs must be at least 1".to_string(),
            ));
        }
        if self.server_category.trim().is_empty() {
            return Err(StoreError::InvalidData(
                "server_category must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_secs)
    }

    pub fn status_ttl(&self) -> Duration {
        Duration::from_secs(self.status_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
