//! PostgreSQL connection implementation

use crate::connection::{Connection, ConnectionConfig, ConnectionHandle};
use crate::error::Result;

const BACKEND: &str = "postgresql";

/// Simulated PostgreSQL connection
#[derive(Debug, Clone)]
pub struct PostgreSqlConnection {
    host: String,
    port: u16,
    username: String,
    password: String,
    database: String,
    ssl_mode: String,
    pool_size: i64,
}

impl PostgreSqlConnection {
    /// Build from a configuration mapping
    ///
    /// Requires `host`, `port`, `username`, `password` and `database`.
    /// `ssl_mode` defaults to "prefer".
    pub fn new(config: ConnectionConfig) -> Result<Self> {
        Ok(Self {
            host: config.require_str(BACKEND, "host")?,
            port: config.require_port(BACKEND, "port")?,
            username: config.require_str(BACKEND, "username")?,
            password: config.require_str(BACKEND, "password")?,
            database: config.require_str(BACKEND, "database")?,
            ssl_mode: config.str_or(BACKEND, "ssl_mode", "prefer")?,
            pool_size: config.int_or(BACKEND, "pool_size", 5)?,
        })
    }

    /// Registry constructor
    pub fn create(config: ConnectionConfig) -> Result<ConnectionHandle> {
        Ok(Box::new(Self::new(config)?))
    }

    pub fn pool_size(&self) -> i64 {
        self.pool_size
    }
}

impl Connection for PostgreSqlConnection {
    fn backend(&self) -> &str {
        BACKEND
    }

    fn connect(&self) -> String {
        format!(
            "PostgreSQL: Connected to database '{}' at {}:{}",
            self.database, self.host, self.port
        )
    }

    fn execute_query(&self, query: &str) -> String {
        format!("PostgreSQL executed: {}", query)
    }

    fn disconnect(&self) -> String {
        "PostgreSQL connection closed".to_string()
    }

    fn connection_string(&self) -> Option<String> {
        Some(format!(
            "postgresql://{}:{}@{}:{}/{}?sslmode={}",
            self.username, self.password, self.host, self.port, self.database, self.ssl_mode
        ))
    }
}
