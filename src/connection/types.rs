//! Type definitions for the connection module
//!
//! This module contains the option values and configuration mappings shared by
//! every connection implementation.

use crate::error::{ConnFactoryError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::traits::Connection;

/// A connection produced by a constructor, owned by the caller
pub type ConnectionHandle = Box<dyn Connection + Send + Sync>;

/// A connection cached by a manager and handed out to many callers
pub type SharedConnection = Arc<dyn Connection + Send + Sync>;

/// A single configuration option value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Str(String),
    Null,
}

impl OptionValue {
    pub fn is_null(&self) -> bool {
        matches!(self, OptionValue::Null)
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{}", b),
            OptionValue::Int(i) => write!(f, "{}", i),
            OptionValue::Str(s) => write!(f, "{}", s),
            OptionValue::Null => write!(f, "null"),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Int(value.into())
    }
}

impl From<u16> for OptionValue {
    fn from(value: u16) -> Self {
        OptionValue::Int(value.into())
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

impl<T: Into<OptionValue>> From<Option<T>> for OptionValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(OptionValue::Null, Into::into)
    }
}

/// Option name to value mapping handed to connection constructors
///
/// The mapping carries no schema. Each backend reads the keys it understands
/// through the typed accessors below and treats a `Null` value as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionConfig {
    options: BTreeMap<String, OptionValue>,
}

impl ConnectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace an option, returning the previous value
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Option<OptionValue> {
        self.options.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        self.options.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.options.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionValue)> {
        self.options.iter()
    }

    /// Look up a present, non-null value
    fn present(&self, key: &str) -> Option<&OptionValue> {
        self.options.get(key).filter(|v| !v.is_null())
    }

    /// Optional string option
    pub fn get_str(&self, backend: &str, key: &str) -> Result<Option<&str>> {
        match self.present(key) {
            None => Ok(None),
            Some(OptionValue::Str(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(ConnFactoryError::invalid_option(backend, key, "string")),
        }
    }

    /// Optional integer option
    pub fn get_int(&self, backend: &str, key: &str) -> Result<Option<i64>> {
        match self.present(key) {
            None => Ok(None),
            Some(OptionValue::Int(i)) => Ok(Some(*i)),
            Some(_) => Err(ConnFactoryError::invalid_option(backend, key, "integer")),
        }
    }

    /// Optional boolean option
    pub fn get_bool(&self, backend: &str, key: &str) -> Result<Option<bool>> {
        match self.present(key) {
            None => Ok(None),
            Some(OptionValue::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(ConnFactoryError::invalid_option(backend, key, "boolean")),
        }
    }

    pub fn require_str(&self, backend: &str, key: &str) -> Result<String> {
        self.get_str(backend, key)?
            .map(str::to_string)
            .ok_or_else(|| ConnFactoryError::missing_option(backend, key))
    }

    pub fn require_int(&self, backend: &str, key: &str) -> Result<i64> {
        self.get_int(backend, key)?
            .ok_or_else(|| ConnFactoryError::missing_option(backend, key))
    }

    /// Required TCP port, checked against the u16 range
    pub fn require_port(&self, backend: &str, key: &str) -> Result<u16> {
        let port = self.require_int(backend, key)?;
        u16::try_from(port)
            .map_err(|_| ConnFactoryError::invalid_option(backend, key, "port number (0-65535)"))
    }

    pub fn str_or(&self, backend: &str, key: &str, default: &str) -> Result<String> {
        Ok(self.get_str(backend, key)?.unwrap_or(default).to_string())
    }

    pub fn int_or(&self, backend: &str, key: &str, default: i64) -> Result<i64> {
        Ok(self.get_int(backend, key)?.unwrap_or(default))
    }

    pub fn bool_or(&self, backend: &str, key: &str, default: bool) -> Result<bool> {
        Ok(self.get_bool(backend, key)?.unwrap_or(default))
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for ConnectionConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            options: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl fmt::Display for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.options.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        Ok(())
    }
}

/// Serializable summary of a connection, used for reporting
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionInfo {
    pub backend: String,
    pub connection_string: Option<String>,
    pub status: String,
}

impl ConnectionInfo {
    pub fn from_connection(conn: &dyn Connection) -> Self {
        Self {
            backend: conn.backend().to_string(),
            connection_string: conn.connection_string(),
            status: conn.connect(),
        }
    }
}
