//! Configuration management for Echo Chamber.
//!
//! Settings are read from the first file found, highest priority first:
//!
//! 1. An explicit path (`--config <path>`); it must exist.
//! 2. The project file `.echo-chamber.json` in the working directory.
//! 3. The user file `<config_dir>/echo-chamber/config.json`.
//!
//! With no file at all, [`ChamberConfig::default`] is used.
//!
//! # Example config.json
//!
//! ```json
//! {
//!   "timestampFormat": "%Y-%m-%d %H:%M:%S",
//!   "color": false,
//!   "showBanner": true
//! }
//! ```

use crate::error::{ChamberError, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the project directory.
pub const PROJECT_CONFIG_FILE: &str = ".echo-chamber.json";

/// Default `chrono` format for echo timestamps (time of day).
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%H:%M:%S";

/// Presentation settings for the harness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChamberConfig {
    /// `chrono` strftime format used when displaying echo timestamps.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Colored terminal output.
    #[serde(default = "default_true")]
    pub color: bool,

    /// Show the welcome banner when the interactive session starts.
    #[serde(default = "default_true")]
    pub show_banner: bool,
}

fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ChamberConfig {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
            color: true,
            show_banner: true,
        }
    }
}

impl ChamberConfig {
    /// Parse and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ChamberError::config_with_path(format!("cannot read config: {e}"), path.to_path_buf())
        })?;
        let config: ChamberConfig = serde_json::from_str(&content).map_err(|e| {
            ChamberError::config_with_path(format!("cannot parse config: {e}"), path.to_path_buf())
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would break rendering.
    pub fn validate(&self) -> Result<()> {
        if self.timestamp_format.trim().is_empty() {
            return Err(ChamberError::InvalidConfig {
                field: "timestampFormat".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error)) {
            return Err(ChamberError::InvalidConfig {
                field: "timestampFormat".to_string(),
                reason: format!("'{}' is not a valid strftime format", self.timestamp_format),
            });
        }
        Ok(())
    }
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Project(PathBuf),
    User(PathBuf),
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Explicit(p) => write!(f, "explicit ({})", p.display()),
            Self::Project(p) => write!(f, "project ({})", p.display()),
            Self::User(p) => write!(f, "user ({})", p.display()),
            Self::Default => write!(f, "built-in defaults"),
        }
    }
}

/// Resolves [`ChamberConfig`] from the configured locations.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    project_dir: PathBuf,
    user_path: Option<PathBuf>,
    explicit: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader for `project_dir` with the platform user config location.
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            user_path: Self::default_user_path(),
            explicit: None,
        }
    }

    /// `<config_dir>/echo-chamber/config.json`, if the platform has one.
    pub fn default_user_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("echo-chamber").join("config.json"))
    }

    /// Override (or disable) the user-level file.
    #[must_use]
    pub fn with_user_path(mut self, path: Option<PathBuf>) -> Self {
        self.user_path = path;
        self
    }

    /// Use this file and nothing else.
    #[must_use]
    pub fn with_explicit(mut self, path: Option<PathBuf>) -> Self {
        self.explicit = path;
        self
    }

    pub fn project_path(&self) -> PathBuf {
        self.project_dir.join(PROJECT_CONFIG_FILE)
    }

    /// Load the highest-priority config available.
    pub fn load(&self) -> Result<(ChamberConfig, ConfigSource)> {
        if let Some(path) = &self.explicit {
            if !path.exists() {
                return Err(ChamberError::config_with_path(
                    "config file does not exist",
                    path.clone(),
                ));
            }
            return Ok((ChamberConfig::from_file(path)?, ConfigSource::Explicit(path.clone())));
        }

        let project = self.project_path();
        if project.exists() {
            return Ok((ChamberConfig::from_file(&project)?, ConfigSource::Project(project)));
        }

        if let Some(user) = self.user_path.as_ref().filter(|p| p.exists()) {
            return Ok((ChamberConfig::from_file(user)?, ConfigSource::User(user.clone())));
        }

        Ok((ChamberConfig::default(), ConfigSource::Default))
    }
}
