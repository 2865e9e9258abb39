//! Configuration structures and loading logic.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub media: MediaConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Catalog database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the catalog SQLite database.
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// Store scope products are loaded and saved at.
    #[serde(default)]
    pub store_id: i64,
}

/// Media storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Media root directory; product images live under `catalog/product`.
    #[serde(default = "default_media_root")]
    pub root: PathBuf,
}

/// Run options configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Delete orphaned files from media storage.
    #[serde(default)]
    pub unlink: bool,

    /// Perform changes instead of the default dry-run.
    #[serde(default)]
    pub apply: bool,
}

fn default_database() -> PathBuf {
    PathBuf::from("catalog.db")
}

fn default_media_root() -> PathBuf {
    PathBuf::from("media")
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            store_id: 0,
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root: default_media_root(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Configuration file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
