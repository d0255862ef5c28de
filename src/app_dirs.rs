//! Resolve configuration and data directories for `frontpage`.
//!
//! The helpers in this module respect environment overrides while falling back
//! to platform-appropriate locations provided by the `directories` crate.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "albo";
const APPLICATION: &str = "frontpage";

const CONFIG_DIR_ENV: &str = "FRONTPAGE_CONFIG_DIR";
const DATA_DIR_ENV: &str = "FRONTPAGE_DATA_DIR";

const SESSION_FILE: &str = "session.json";
const LOG_FILE: &str = "frontpage.log";

/// Return the platform-specific directory layout for the application.
fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .ok_or_else(|| anyhow!("unable to determine project directories for frontpage"))
}

/// Resolve an override directory from an environment variable.
///
/// An empty string is treated the same as an unset value.
fn dir_from_env(name: &str) -> Option<PathBuf> {
    let value = env::var_os(name)?;
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

/// Return the configuration directory used to persist user preferences.
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(dir) = dir_from_env(CONFIG_DIR_ENV) {
        return Ok(dir);
    }

    Ok(project_dirs()?.config_local_dir().to_path_buf())
}

/// Return the data directory holding the session file and the log.
pub fn get_data_dir() -> Result<PathBuf> {
    if let Some(dir) = dir_from_env(DATA_DIR_ENV) {
        return Ok(dir);
    }

    Ok(project_dirs()?.data_local_dir().to_path_buf())
}

/// Location of the persisted session record.
pub fn session_file() -> Result<PathBuf> {
    Ok(get_data_dir()?.join(SESSION_FILE))
}

/// Location of the log file.
pub fn log_file() -> Result<PathBuf> {
    Ok(get_data_dir()?.join(LOG_FILE))
}
