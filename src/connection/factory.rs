//! Factory for creating connection instances
//!
//! This module provides a registry-based factory: connection types are looked
//! up by name and built from a configuration mapping, and new types can be
//! registered at runtime.

use crate::error::{ConnFactoryError, Result};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::types::{ConnectionConfig, ConnectionHandle};
use super::{MongoDbConnection, MySqlConnection, PostgreSqlConnection, RedisConnection};

/// Constructor turning a configuration mapping into a connection
pub type Constructor = Arc<dyn Fn(ConnectionConfig) -> Result<ConnectionHandle> + Send + Sync>;

/// Registry of connection constructors keyed by backend type name
///
/// Type names are case-sensitive and stored as given. The registry is an
/// ordinary value: share it with `Arc` rather than reaching for a global.
pub struct ConnectionRegistry {
    constructors: RwLock<HashMap<String, Constructor>>,
}

impl ConnectionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            constructors: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry holding the built-in mysql, postgresql, mongodb and redis types
    pub fn with_builtins() -> Self {
        let mut constructors: HashMap<String, Constructor> = HashMap::new();
        constructors.insert("mysql".to_string(), Arc::new(MySqlConnection::create));
        constructors.insert("postgresql".to_string(), Arc::new(PostgreSqlConnection::create));
        constructors.insert("mongodb".to_string(), Arc::new(MongoDbConnection::create));
        constructors.insert("redis".to_string(), Arc::new(RedisConnection::create));
        Self {
            constructors: RwLock::new(constructors),
        }
    }

    /// Register a connection type
    ///
    /// An existing constructor under the same name is replaced without error,
    /// which is how tests swap a built-in for a double.
    pub fn register<F>(&self, type_id: impl Into<String>, constructor: F) -> Result<()>
    where
        F: Fn(ConnectionConfig) -> Result<ConnectionHandle> + Send + Sync + 'static,
    {
        let type_id = type_id.into();
        let mut constructors = self.constructors.write()
            .map_err(|e| ConnFactoryError::Other(format!("Failed to acquire write lock: {}", e)))?;

        if constructors.insert(type_id.clone(), Arc::new(constructor)).is_some() {
            log::debug!("Replaced constructor for connection type: {}", type_id);
        } else {
            log::debug!("Registered connection type: {}", type_id);
        }
        Ok(())
    }

    /// Remove a connection type, returning whether it was registered
    pub fn unregister(&self, type_id: &str) -> Result<bool> {
        let mut constructors = self.constructors.write()
            .map_err(|e| ConnFactoryError::Other(format!("Failed to acquire write lock: {}", e)))?;
        Ok(constructors.remove(type_id).is_some())
    }

    /// Create a connection of the given type
    ///
    /// Errors returned by the constructor are passed through untouched.
    pub fn create(&self, type_id: &str, config: ConnectionConfig) -> Result<ConnectionHandle> {
        let constructor = {
            let constructors = self.constructors.read()
                .map_err(|e| ConnFactoryError::Other(format!("Failed to acquire read lock: {}", e)))?;

            match constructors.get(type_id) {
                Some(constructor) => Arc::clone(constructor),
                None => {
                    let mut known: Vec<String> = constructors.keys().cloned().collect();
                    known.sort();
                    return Err(ConnFactoryError::UnknownType {
                        type_id: type_id.to_string(),
                        known,
                    });
                }
            }
        };

        // Lock released: constructors may use the registry themselves
        log::info!("Creating {} connection", type_id);
        constructor(config)
    }

    /// Check whether a type is registered
    pub fn is_registered(&self, type_id: &str) -> bool {
        self.constructors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(type_id)
    }

    /// Registered type names, sorted
    pub fn registered_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self
            .constructors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        types.sort();
        types
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
