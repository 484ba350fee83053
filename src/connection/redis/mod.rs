//! Redis connection implementation

use crate::connection::{Connection, ConnectionConfig, ConnectionHandle};
use crate::error::Result;

const BACKEND: &str = "redis";

/// Simulated Redis connection
#[derive(Debug, Clone)]
pub struct RedisConnection {
    host: String,
    port: u16,
    password: Option<String>,
    db: i64,
}

impl RedisConnection {
    /// Build from a configuration mapping
    ///
    /// Requires `host` and `port`; `password` is optional and `db` defaults to 0.
    pub fn new(config: ConnectionConfig) -> Result<Self> {
        Ok(Self {
            host: config.require_str(BACKEND, "host")?,
            port: config.require_port(BACKEND, "port")?,
            password: config
                .get_str(BACKEND, "password")?
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            db: config.int_or(BACKEND, "db", 0)?,
        })
    }

    /// Registry constructor
    pub fn create(config: ConnectionConfig) -> Result<ConnectionHandle> {
        Ok(Box::new(Self::new(config)?))
    }
}

impl Connection for RedisConnection {
    fn backend(&self) -> &str {
        BACKEND
    }

    fn connect(&self) -> String {
        format!("Redis: Connected to {}:{}", self.host, self.port)
    }

    fn execute_query(&self, query: &str) -> String {
        format!("Redis executed: {}", query)
    }

    fn disconnect(&self) -> String {
        "Redis connection closed".to_string()
    }

    fn connection_string(&self) -> Option<String> {
        let auth = self
            .password
            .as_ref()
            .map(|pwd| format!(":{}@", pwd))
            .unwrap_or_default();
        Some(format!("redis://{}{}:{}/{}", auth, self.host, self.port, self.db))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConnFactoryError;

    #[test]
    fn test_without_password() {
        let config = ConnectionConfig::new()
            .with("host", "localhost")
            .with("port", 6379);
        let conn = RedisConnection::new(config).unwrap();
        assert_eq!(conn.connect(), "Redis: Connected to localhost:6379");
        assert_eq!(conn.connection_string().unwrap(), "redis://localhost:6379/0");
    }

    #[test]
    fn test_with_password_and_db() {
        let config = ConnectionConfig::new()
            .with("host", "prod-redis.company.com")
            .with("port", 6379)
            .with("password", "secret")
            .with("db", 3);
        let conn = RedisConnection::new(config).unwrap();
        assert_eq!(
            conn.connection_string().unwrap(),
            "redis://:secret@prod-redis.company.com:6379/3"
        );
        assert_eq!(conn.execute_query("GET key"), "Redis executed: GET key");
    }

    #[test]
    fn test_host_required() {
        let config = ConnectionConfig::new().with("port", 6379);
        assert!(matches!(
            RedisConnection::new(config),
            Err(ConnFactoryError::MissingOption { .. })
        ));
    }
}
