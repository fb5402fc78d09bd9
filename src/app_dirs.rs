//! Location of the `.cs_predictor` folder that holds settings and logs.
//!
//! The folder lives under the OS config directory unless
//! `CS_PREDICTOR_CONFIG_HOME` names another base.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use thiserror::Error;

/// Name of the application directory that lives under the config base.
pub const APP_DIR_NAME: &str = ".cs_predictor";
/// Environment variable that overrides the config base directory.
pub const CONFIG_HOME_ENV: &str = "CS_PREDICTOR_CONFIG_HOME";

#[derive(Debug, Error)]
pub enum AppDirError {
    #[error("No config directory available for application files")]
    NoBaseDir,
    #[error("Failed to create application directory at {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Return the `.cs_predictor` directory, creating it if needed.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    let base = config_base_dir().ok_or(AppDirError::NoBaseDir)?;
    app_root_dir_in(&base)
}

/// Return the logs directory inside the app root, creating it if needed.
pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    create_dir(app_root_dir()?.join("logs"))
}

fn app_root_dir_in(base: &Path) -> Result<PathBuf, AppDirError> {
    create_dir(base.join(APP_DIR_NAME))
}

fn create_dir(path: PathBuf) -> Result<PathBuf, AppDirError> {
    std::fs::create_dir_all(&path).map_err(|source| AppDirError::CreateDir {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn config_base_dir() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_HOME_ENV) {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf()),
    }
}
