//! Catalog configuration
//!
//! A JSON file naming the catalog file, how to open it, the minimum log
//! severity and the location labels. Only `path` is required:
//!
//! ```json
//! {
//!     "path": "books.csv",
//!     "mode": "read_write",
//!     "log_level": "warn",
//!     "locations": { "default_label": "On loan", "mapping": { "Home": "Home" } }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::location::{LocationMapper, HOME, ON_LOAN};
use crate::observability::{log_event_with_fields, Event, Logger, Severity};
use crate::store::{OpenMode, Store, StoreResult};

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Validation(String),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Read { .. } => "SHELF_CONFIG_READ_ERROR",
            ConfigError::Json(_) | ConfigError::Validation(_) => "SHELF_CONFIG_INVALID",
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::Error
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShelfConfig {
    /// Catalog file (required)
    pub path: PathBuf,

    #[serde(default = "default_mode")]
    pub mode: OpenMode,

    #[serde(default = "default_log_level")]
    pub log_level: Severity,

    #[serde(default)]
    pub locations: LocationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocationConfig {
    /// Label for unmapped locations; `null` shows the location itself
    #[serde(default = "default_label")]
    pub default_label: Option<String>,

    #[serde(default = "default_mapping")]
    pub mapping: BTreeMap<String, String>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            default_label: default_label(),
            mapping: default_mapping(),
        }
    }
}

fn default_mode() -> OpenMode {
    OpenMode::ReadWrite
}

fn default_log_level() -> Severity {
    Severity::Warn
}

fn default_label() -> Option<String> {
    Some(ON_LOAN.to_string())
}

fn default_mapping() -> BTreeMap<String, String> {
    BTreeMap::from([(HOME.to_string(), HOME.to_string())])
}

impl ShelfConfig {
    /// Config with defaults for everything but the path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mode: default_mode(),
            log_level: default_log_level(),
            locations: LocationConfig::default(),
        }
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_json(&content)?;
        log_event_with_fields(
            Event::ConfigLoaded,
            &[
                ("config", path.to_string_lossy().as_ref()),
                ("mode", config.mode.as_str()),
            ],
        );
        Ok(config)
    }

    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: ShelfConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation("path must not be empty".to_string()));
        }
        if let Some((_, label)) = self.locations.mapping.iter().find(|(k, _)| k.is_empty()) {
            return Err(ConfigError::Validation(format!(
                "location mapping has an empty key (label '{}')",
                label
            )));
        }
        Ok(())
    }

    pub fn location_mapper(&self) -> LocationMapper {
        LocationMapper::new(
            self.locations.default_label.clone(),
            self.locations
                .mapping
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        )
    }

    /// Applies the log level, then opens the catalog file.
    pub fn open_store(&self) -> StoreResult<Store> {
        Logger::set_min_severity(self.log_level);
        Store::open(&self.path, self.mode)
    }
}
