//! Error types for connfactory
//!
//! This module defines custom error types using thiserror for better error handling.

use thiserror::Error;

/// Main error type for connfactory
#[derive(Error, Debug)]
pub enum ConnFactoryError {
    /// No constructor registered for the requested connection type
    #[error("Unknown database type: {type_id}. Available types: [{}]", .known.join(", "))]
    UnknownType { type_id: String, known: Vec<String> },

    /// Environment absent from the configuration store
    #[error("Unknown environment: {0}")]
    UnknownEnvironment(String),

    /// Environment exists but has no entry for the connection type
    #[error("No configuration for {type_id} in {environment} environment")]
    UnknownConfiguration {
        environment: String,
        type_id: String,
    },

    /// A required connection option is missing or null
    #[error("Missing required option '{option}' for {backend}")]
    MissingOption { backend: String, option: String },

    /// A connection option holds a value of the wrong kind
    #[error("Invalid option '{option}' for {backend}: expected {expected}")]
    InvalidOption {
        backend: String,
        option: String,
        expected: &'static str,
    },

    /// Failure raised by a custom connection constructor
    #[error("Connection construction failed: {0}")]
    Construction(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parse error: {0}")]
    YamlError(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

/// Result type alias for connfactory
pub type Result<T> = std::result::Result<T, ConnFactoryError>;

impl ConnFactoryError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ConnFactoryError::ConfigError(msg.into())
    }

    /// Create a construction error
    pub fn construction<S: Into<String>>(msg: S) -> Self {
        ConnFactoryError::Construction(msg.into())
    }

    /// Create a missing option error
    pub fn missing_option(backend: &str, option: &str) -> Self {
        ConnFactoryError::MissingOption {
            backend: backend.to_string(),
            option: option.to_string(),
        }
    }

    /// Create an invalid option error
    pub fn invalid_option(backend: &str, option: &str, expected: &'static str) -> Self {
        ConnFactoryError::InvalidOption {
            backend: backend.to_string(),
            option: option.to_string(),
            expected,
        }
    }
}

/// Convert from anyhow::Error, keeping the context chain
impl From<anyhow::Error> for ConnFactoryError {
    fn from(err: anyhow::Error) -> Self {
        ConnFactoryError::Other(format!("{:#}", err))
    }
}

/// Convert from serde_yaml::Error
impl From<serde_yaml::Error> for ConnFactoryError {
    fn from(err: serde_yaml::Error) -> Self {
        ConnFactoryError::YamlError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_lists_known_ids() {
        let err = ConnFactoryError::UnknownType {
            type_id: "oracle".to_string(),
            known: vec!["mysql".to_string(), "redis".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Unknown database type: oracle. Available types: [mysql, redis]"
        );
    }

    #[test]
    fn test_unknown_configuration_message() {
        let err = ConnFactoryError::UnknownConfiguration {
            environment: "development".to_string(),
            type_id: "cassandra".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No configuration for cassandra in development environment"
        );
    }

    #[test]
    fn test_from_anyhow_keeps_context() {
        use anyhow::Context;

        fn lookup() -> Result<u16> {
            let port: u16 = "not-a-port"
                .parse::<u16>()
                .context("Failed to read port")?;
            Ok(port)
        }

        match lookup() {
            Err(ConnFactoryError::Other(msg)) => {
                assert!(msg.starts_with("Failed to read port: "));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
