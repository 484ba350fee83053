//! Configuration module for connfactory
//!
//! Handles loading and managing configuration from YAML files and environment variables.

use crate::connection::ConfigurationStore;
use crate::error::{ConnFactoryError, Result};
use crate::utils::path;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub global: GlobalConfig,

    /// Per-environment connection settings layered over the built-in ones
    #[serde(default, skip_serializing_if = "ConfigurationStore::is_empty")]
    pub environments: ConfigurationStore,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Environment used when none is given on the command line
    #[serde(default = "default_environment")]
    pub environment: String,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub enable_colors: bool,

    /// Output in JSON format
    #[serde(default)]
    pub json: bool,
}

/// Global configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Verbose logging
    #[serde(default)]
    pub verbose: bool,

    /// Custom config path
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

// Default value functions
fn default_environment() -> String {
    env::var("CONNFACTORY_ENV").unwrap_or_else(|_| "development".to_string())
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            output: OutputConfig::default(),
            global: GlobalConfig::default(),
            environments: ConfigurationStore::new(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            enable_colors: true,
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location and environment variables
    ///
    /// A default config file is written when none exists yet.
    pub fn load() -> Result<Self> {
        // Ensure directories exist
        path::ensure_config_dir()?;

        let config_file = path::config_file()?;

        let mut config = if config_file.exists() {
            Self::read_file(&config_file)?
        } else {
            // Create default config
            let config = Self::default();
            config.save(&config_file)?;
            log::info!("Wrote default configuration to {:?}", config_file);
            config
        };

        config.global.config_path = Some(config_file);

        // Override with environment variables
        config.apply_env();

        Ok(config)
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConnFactoryError::config(format!(
                "Config file not found: {:?}",
                path
            )));
        }

        let mut config = Self::read_file(path)?;
        config.global.config_path = Some(path.to_path_buf());
        config.apply_env();
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self> {
        Self::parse_file(path).map_err(|e| ConnFactoryError::config(format!("{:#}", e)))
    }

    fn parse_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))
    }

    /// Apply environment variable overrides
    fn apply_env(&mut self) {
        if let Ok(val) = env::var("CONNFACTORY_ENV") {
            self.general.environment = val;
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| ConnFactoryError::YamlError(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, yaml)
            .map_err(|e| ConnFactoryError::config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Build the configuration store: built-in settings overlaid with the file's
    pub fn configuration_store(&self) -> ConfigurationStore {
        let mut store = ConfigurationStore::builtin();
        store.merge(self.environments.clone());
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::OptionValue;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(!config.general.environment.is_empty());
        assert!(config.output.enable_colors);
        assert!(!config.output.json);
        assert!(config.environments.is_empty());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("general"));
        assert!(yaml.contains("output"));
        assert!(!yaml.contains("environments"));
    }

    #[test]
    fn test_load_from_file_with_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "output:\n  json: true\n\
             environments:\n  staging:\n    redis:\n      host: staging-redis\n      port: 6379\n"
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert!(config.output.json);
        assert!(config.output.enable_colors);
        assert_eq!(config.global.config_path.as_deref(), Some(file.path()));

        let store = config.configuration_store();
        assert_eq!(store.environments(), vec!["development", "production", "staging"]);
        let redis = store.get_config("staging", "redis").unwrap();
        assert_eq!(redis.get("host"), Some(&OptionValue::Str("staging-redis".into())));
    }

    #[test]
    fn test_load_from_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            AppConfig::load_from(&tmp.path().join("absent.yaml")),
            Err(ConnFactoryError::ConfigError(_))
        ));
    }

    #[test]
    fn test_save_and_reload() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("config.yaml");

        let mut config = AppConfig::default();
        config.output.enable_colors = false;
        config.save(&file).unwrap();

        let reloaded = AppConfig::load_from(&file).unwrap();
        assert!(!reloaded.output.enable_colors);
    }

    #[test]
    fn test_invalid_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "output: [unterminated").unwrap();
        match AppConfig::load_from(file.path()) {
            Err(ConnFactoryError::ConfigError(msg)) => {
                assert!(msg.starts_with("Failed to parse config file"));
                // underlying YAML cause is kept after the context
                assert!(msg.contains(": "));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
