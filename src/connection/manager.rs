//! Connection manager - environment-scoped, cached connections

use crate::connection::{ConfigurationStore, ConnectionRegistry, SharedConnection};
use crate::error::Result;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Connection manager bound to a single environment
///
/// The manager combines the configuration store with the registry: the first
/// request for a type looks up its settings, builds the connection and caches
/// it, and later requests get the cached instance back.
///
/// # Thread Safety
///
/// The cache is guarded per instance, so a manager can be shared across
/// threads using Arc. Two threads missing the cache at the same time may both
/// build a connection; only the first one cached is ever handed out.
pub struct ConnectionManager {
    environment: String,
    store: Arc<ConfigurationStore>,
    registry: Arc<ConnectionRegistry>,
    /// Cache of open connections (type -> connection)
    connections: RwLock<BTreeMap<String, SharedConnection>>,
}

impl ConnectionManager {
    /// Create a manager for an environment
    ///
    /// The environment is not checked here; an unknown one surfaces on the
    /// first `get_connection` call.
    pub fn new(
        environment: impl Into<String>,
        store: Arc<ConfigurationStore>,
        registry: Arc<ConnectionRegistry>,
    ) -> Self {
        Self {
            environment: environment.into(),
            store,
            registry,
            connections: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a manager over the built-in configuration and connection types
    pub fn with_defaults(environment: impl Into<String>) -> Self {
        Self::new(
            environment,
            Arc::new(ConfigurationStore::builtin()),
            Arc::new(ConnectionRegistry::with_builtins()),
        )
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Get or create a connection
    ///
    /// Errors from the store or the registry are returned as-is and leave the
    /// cache untouched. The cache lock is not held while the connection is
    /// built, so constructors may call back into this manager.
    pub fn get_connection(&self, type_id: &str) -> Result<SharedConnection> {
        // Check if already open
        if let Some(conn) = self.read_cache().get(type_id) {
            log::debug!("Reusing cached {} connection ({})", type_id, self.environment);
            return Ok(Arc::clone(conn));
        }

        let config = self.store.get_config(&self.environment, type_id)?;
        let built: SharedConnection = Arc::from(self.registry.create(type_id, config)?);

        // Another caller may have cached one meanwhile; the first one stored wins
        let mut connections = self.write_cache();
        let conn = connections
            .entry(type_id.to_string())
            .or_insert_with(|| {
                log::info!("Opened {} connection for {} environment", type_id, self.environment);
                built
            });
        Ok(Arc::clone(conn))
    }

    /// Close all open connections
    ///
    /// Calls `disconnect` on each cached connection, then empties the cache.
    /// Returns the (type, message) pairs in type order.
    pub fn close_all(&self) -> Result<Vec<(String, String)>> {
        let drained = std::mem::take(&mut *self.write_cache());

        let report = drained
            .into_iter()
            .map(|(type_id, conn)| {
                let message = conn.disconnect();
                log::info!("Closing {}: {}", type_id, message);
                (type_id, message)
            })
            .collect();

        Ok(report)
    }

    /// Types with an open connection, sorted
    pub fn cached_types(&self) -> Vec<String> {
        self.read_cache().keys().cloned().collect()
    }

    pub fn is_cached(&self, type_id: &str) -> bool {
        self.read_cache().contains_key(type_id)
    }

    /// Number of open connections
    pub fn len(&self) -> usize {
        self.read_cache().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // The map is only touched by whole inserts and swaps, so a panic elsewhere
    // never leaves it half-updated; a poisoned lock still holds valid data.
    fn read_cache(&self) -> RwLockReadGuard<'_, BTreeMap<String, SharedConnection>> {
        self.connections.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_cache(&self) -> RwLockWriteGuard<'_, BTreeMap<String, SharedConnection>> {
        self.connections.write().unwrap_or_else(PoisonError::into_inner)
    }
}
