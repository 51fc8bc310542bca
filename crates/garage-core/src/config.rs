//! Board configuration.
//!
//! Settings are read from `$XDG_CONFIG_HOME/garage/config.json` when the file
//! exists. Every field has a default, so a partial file is fine:
//!
//! ```json
//! {
//!   "board": { "resort_on_status_change": false },
//!   "current_user": "Mike Johnson",
//!   "search_debounce_ms": 300
//! }
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

use crate::{
    error::{GarageError, Result},
    models::DEFAULT_USER,
};

const CONFIG_FILE: &str = "config.json";

/// Ordering behavior of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Re-sort the whole collection by priority after every status change
    pub resort_on_status_change: bool,

    /// Sort each derived column by priority
    pub sort_columns: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            resort_on_status_change: true,
            sort_columns: true,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GarageConfig {
    pub board: BoardConfig,

    /// Identity matched by the "my orders" filter: a worker id or name
    pub current_user: String,

    /// Quiet period before a search term is applied
    pub search_debounce_ms: u64,

    /// Lifetime of cached fetches
    pub cache_ttl_secs: u64,
}

impl Default for GarageConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            current_user: DEFAULT_USER.to_string(),
            search_debounce_ms: 200,
            cache_ttl_secs: 30,
        }
    }
}

impl GarageConfig {
    /// Load configuration from `path`, or from the XDG config directory when
    /// `path` is `None`. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `GarageError::Configuration` when the file cannot be read or
    /// parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_config_path(),
        };

        match path {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| GarageError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&contents).map_err(|e| GarageError::Configuration {
            message: format!("Invalid config file '{}': {e}", path.display()),
        })
    }

    fn default_config_path() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix("garage").find_config_file(CONFIG_FILE)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn cache_ttl(&self) -> SignedDuration {
        SignedDuration::from_secs(i64::try_from(self.cache_ttl_secs).unwrap_or(i64::MAX))
    }
}
