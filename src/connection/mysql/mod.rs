//! MySQL connection implementation

use crate::connection::{Connection, ConnectionConfig, ConnectionHandle};
use crate::error::Result;

const BACKEND: &str = "mysql";

/// Simulated MySQL connection
#[derive(Debug, Clone)]
pub struct MySqlConnection {
    host: String,
    port: u16,
    username: String,
    password: String,
    ssl_enabled: bool,
    pool_size: i64,
}

impl MySqlConnection {
    /// Build from a configuration mapping
    ///
    /// Requires `host`, `port`, `username` and `password`. `ssl_enabled`
    /// defaults to false and `pool_size` to 5.
    pub fn new(config: ConnectionConfig) -> Result<Self> {
        Ok(Self {
            host: config.require_str(BACKEND, "host")?,
            port: config.require_port(BACKEND, "port")?,
            username: config.require_str(BACKEND, "username")?,
            password: config.require_str(BACKEND, "password")?,
            ssl_enabled: config.bool_or(BACKEND, "ssl_enabled", false)?,
            pool_size: config.int_or(BACKEND, "pool_size", 5)?,
        })
    }

    /// Registry constructor
    pub fn create(config: ConnectionConfig) -> Result<ConnectionHandle> {
        Ok(Box::new(Self::new(config)?))
    }
}

impl Connection for MySqlConnection {
    fn backend(&self) -> &str {
        BACKEND
    }

    fn connect(&self) -> String {
        format!(
            "MySQL: Connected to {}:{}\nMySQL: Pool size: {}, SSL: {}",
            self.host,
            self.port,
            self.pool_size,
            if self.ssl_enabled { "enabled" } else { "disabled" }
        )
    }

    fn execute_query(&self, query: &str) -> String {
        format!("MySQL executed: {}", query)
    }

    fn disconnect(&self) -> String {
        "MySQL connection closed".to_string()
    }

    fn connection_string(&self) -> Option<String> {
        let ssl_param = if self.ssl_enabled { "?sslmode=require" } else { "" };
        Some(format!(
            "mysql://{}:{}@{}:{}{}",
            self.username, self.password, self.host, self.port, ssl_param
        ))
    }
}
