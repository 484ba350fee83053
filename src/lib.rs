//! connfactory: registry-based factory for simulated database connections
//!
//! Connection types are registered by name in a [`ConnectionRegistry`],
//! settings live in a per-environment [`ConfigurationStore`], and a
//! [`ConnectionManager`] ties the two together, handing out one cached
//! connection per type. Connecting and querying only format status messages.
//!
//! ```
//! use connfactory::ConnectionManager;
//!
//! let manager = ConnectionManager::with_defaults("development");
//! let mysql = manager.get_connection("mysql").unwrap();
//! assert!(mysql.connect().starts_with("MySQL: Connected to localhost:3306"));
//! assert_eq!(mysql.execute_query("SELECT 1"), "MySQL executed: SELECT 1");
//! manager.close_all().unwrap();
//! ```

pub mod cli;
pub mod config;
pub mod connection;
pub mod error;
pub mod prelude;
pub mod utils;

// Re-export common types
pub use error::{ConnFactoryError, Result};

pub use connection::{
    ConfigurationStore, Connection, ConnectionConfig, ConnectionHandle, ConnectionManager,
    ConnectionRegistry, OptionValue, SharedConnection,
};
