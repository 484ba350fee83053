//! Path utilities for configuration files
//!
//! Handles XDG directory specifications and path resolution.

use crate::error::{ConnFactoryError, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Get the connfactory configuration directory
///
/// Priority:
/// 1. CONNFACTORY_CONFIG_HOME environment variable
/// 2. CONNFACTORY_HOME environment variable
/// 3. XDG_CONFIG_HOME/connfactory
/// 4. ~/.config/connfactory (fallback)
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(path) = env::var("CONNFACTORY_CONFIG_HOME") {
        return Ok(PathBuf::from(path));
    }

    if let Ok(path) = env::var("CONNFACTORY_HOME") {
        return Ok(PathBuf::from(path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("connfactory"));
    }

    Err(ConnFactoryError::config("Unable to determine configuration directory"))
}

/// Get the path to the config file
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.yaml"))
}

/// Ensure directory exists, create if necessary
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)
            .map_err(|e| ConnFactoryError::config(format!("Failed to create directory: {}", e)))?;
    }
    Ok(())
}

/// Ensure the connfactory config directory exists
pub fn ensure_config_dir() -> Result<()> {
    ensure_dir(&config_dir()?)
}

/// Expand tilde (~) in path
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
