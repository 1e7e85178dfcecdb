use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use stirling_update_core::ActionWording;
use stirling_update_service::{
    DEFAULT_ANNOUNCEMENTS_URL, DEFAULT_DOWNLOAD_BASE_URL, UpdateConfig, normalize_base_url,
};
use thiserror::Error;

use crate::paths::AppPaths;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to access settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_announcements_url")]
    pub announcements_url: String,

    #[serde(default = "default_download_base_url")]
    pub download_base_url: String,

    #[serde(default = "default_true")]
    pub update_checks_enabled: bool,

    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    #[serde(default)]
    pub action_wording: ActionWording,

    #[serde(default)]
    pub debug_logging: bool,

    #[serde(default = "default_max_log_size_bytes")]
    pub max_log_size_bytes: u64,
}

fn default_announcements_url() -> String {
    DEFAULT_ANNOUNCEMENTS_URL.to_string()
}

fn default_download_base_url() -> String {
    DEFAULT_DOWNLOAD_BASE_URL.to_string()
}

fn default_true() -> bool {
    true
}

fn default_http_timeout() -> u64 {
    10
}

fn default_max_log_size_bytes() -> u64 {
    5 * 1024 * 1024
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            announcements_url: default_announcements_url(),
            download_base_url: default_download_base_url(),
            update_checks_enabled: true,
            http_timeout_secs: default_http_timeout(),
            action_wording: ActionWording::default(),
            debug_logging: false,
            max_log_size_bytes: default_max_log_size_bytes(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from the platform settings file when no
    /// path is given.
    ///
    /// A missing file, or a platform without a config directory, yields the
    /// defaults.
    ///
    /// # Errors
    /// Returns an error when an existing file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load_or_default(path),
            None => match AppPaths::new() {
                Ok(paths) => Self::load_or_default(&paths.settings_file()),
                Err(_) => Ok(Self::default()),
            },
        }
    }

    /// Read `path` if it exists, otherwise return the defaults.
    ///
    /// # Errors
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Read and parse a settings file.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read or is not valid JSON.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Write settings as pretty JSON, creating parent directories.
    ///
    /// # Errors
    /// Returns an error when the file or its directory cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let io_error = |source: std::io::Error| SettingsError::Io {
            path: path.display().to_string(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        std::fs::write(path, content).map_err(io_error)
    }

    #[must_use]
    pub fn to_update_config(&self) -> UpdateConfig {
        UpdateConfig {
            announcements_url: self.announcements_url.clone(),
            download_base_url: normalize_base_url(self.download_base_url.clone()),
            update_checks_enabled: self.update_checks_enabled,
            http_timeout: Duration::from_secs(self.http_timeout_secs.max(1)),
            action_wording: self.action_wording.clone(),
        }
    }
}
