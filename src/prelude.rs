//! Core types and error handling
//!
//! This module re-exports commonly used types and traits for the connfactory crate.

pub use crate::connection::{
    ConfigurationStore, Connection, ConnectionConfig, ConnectionHandle, ConnectionManager,
    ConnectionRegistry, OptionValue, SharedConnection,
};
pub use crate::error::{ConnFactoryError, Result};
pub use anyhow::{anyhow, Context};
pub use log::{debug, error, info, warn};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_covers_extension() {
        struct Echo;

        impl Connection for Echo {
            fn backend(&self) -> &str {
                "echo"
            }

            fn connect(&self) -> String {
                "Echo: connected".to_string()
            }

            fn execute_query(&self, query: &str) -> String {
                query.to_string()
            }

            fn disconnect(&self) -> String {
                "Echo: closed".to_string()
            }
        }

        let registry = ConnectionRegistry::new();
        registry
            .register("echo", |_config: ConnectionConfig| Ok(Box::new(Echo) as ConnectionHandle))
            .unwrap();
        let conn = registry.create("echo", ConnectionConfig::new()).unwrap();
        assert_eq!(conn.execute_query("ping"), "ping");
    }

    #[test]
    fn test_prelude_anyhow_context() {
        fn port(raw: &str) -> Result<u16> {
            let port = raw
                .parse::<u16>()
                .with_context(|| format!("bad port {:?}", raw))?;
            if port == 0 {
                return Err(anyhow!("port must be non-zero").into());
            }
            Ok(port)
        }

        assert_eq!(port("6379").unwrap(), 6379);
        assert!(matches!(port("x"), Err(ConnFactoryError::Other(msg)) if msg.starts_with("bad port \"x\": ")));
        assert!(matches!(port("0"), Err(ConnFactoryError::Other(msg)) if msg == "port must be non-zero"));
    }
}
