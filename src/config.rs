//! Read-only application settings stored as TOML in the app directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::app_dirs;

/// Default filename used to store the app settings.
pub const SETTINGS_FILE_NAME: &str = "settings.toml";
/// Base address of the local prediction service.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";
/// Upper bound for the in-memory prediction history.
pub const MAX_HISTORY_LIMIT: usize = 10;

/// Which prediction view is selected when the window opens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictorTab {
    /// Round winner classification.
    #[default]
    Round,
    /// Headshot count regression.
    Headshot,
}

/// Settings loaded from `settings.toml`; every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Base URL of the prediction service.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub default_tab: PredictorTab,
    /// Number of headshot predictions kept in memory.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            default_tab: PredictorTab::default(),
            history_limit: default_history_limit(),
        }
    }
}

impl AppSettings {
    fn normalized(mut self) -> Self {
        self.endpoint = self.endpoint.trim().to_string();
        self.history_limit = self.history_limit.clamp(1, MAX_HISTORY_LIMIT);
        self
    }

    /// Parse the configured endpoint into a URL usable as a join base.
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let mut url = Url::parse(&self.endpoint).map_err(|source| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            source,
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            });
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

/// Errors that may occur while loading app settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The application directory could not be prepared.
    #[error("Settings directory unavailable: {0}")]
    AppDir(#[from] app_dirs::AppDirError),
    /// Failed to read the settings file.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The settings file is not valid TOML for [`AppSettings`].
    #[error("Invalid settings at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// The configured endpoint is not an absolute base URL.
    #[error("Invalid endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        source: url::ParseError,
    },
}

/// Resolve the settings file path, ensuring the parent directory exists.
pub fn settings_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(SETTINGS_FILE_NAME))
}

/// Load settings from the app directory, returning defaults if missing.
pub fn load_or_default() -> Result<AppSettings, ConfigError> {
    load_settings_from(&settings_path()?)
}

/// Load settings from an explicit path, returning defaults if missing.
pub fn load_settings_from(path: &Path) -> Result<AppSettings, ConfigError> {
    if !path.exists() {
        return Ok(AppSettings::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: AppSettings = toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = settings.normalized();
    settings.endpoint_url()?;
    Ok(settings)
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_history_limit() -> usize {
    MAX_HISTORY_LIMIT
}
