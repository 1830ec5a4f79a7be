//! Application configuration management.
//!
//! Configuration is stored at `~/.config/gobees/config.json` and covers
//! the storage directory override, the cache staleness window and the last
//! apiary opened.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::models::ApiaryId;

/// Application name used for config/storage directory paths
const APP_NAME: &str = "gobees";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Cached data is considered stale after 1 hour by default.
/// Balances freshness with reducing store round-trips for slowly-changing
/// data.
const DEFAULT_CACHE_STALE_MINUTES: i64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub storage_dir: Option<PathBuf>,
    pub cache_stale_minutes: i64,
    pub last_apiary_id: Option<ApiaryId>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: None,
            cache_stale_minutes: DEFAULT_CACHE_STALE_MINUTES,
            last_apiary_id: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for the local store, honoring the configured override.
    pub fn storage_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.storage_dir {
            return Ok(dir.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    /// The staleness window as a duration.
    pub fn stale_after(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.cache_stale_minutes)
    }
}
