//! User settings loaded from `settings.json` in the config directory.

use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths;

/// Settings error type.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read settings: {0}")]
    Io(#[from] io::Error),
    #[error("malformed settings file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown log level {0:?}")]
    InvalidLogLevel(String),
}

/// Startup options for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// One of off, error, warn, info, debug, trace.
    pub log_level: String,
    /// Rows per page. Unset fits the page to the terminal.
    pub page_size: Option<usize>,
    /// Column keys hidden when the table opens. Unknown keys are ignored.
    pub hidden_columns: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            page_size: None,
            hidden_columns: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from the default location.
    ///
    /// A missing file, or a platform without a config directory, gives the
    /// defaults.
    pub fn load() -> Result<Self, SettingsError> {
        match paths::settings_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        let settings: Settings = serde_json::from_str(&contents)?;
        settings.level_filter()?;
        Ok(settings)
    }

    /// The configured log level.
    pub fn level_filter(&self) -> Result<LevelFilter, SettingsError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| SettingsError::InvalidLogLevel(self.log_level.clone()))
    }
}
