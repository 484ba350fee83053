//! Factory walk-through printed by `connfactory demo`

use crate::cli::formatter::{format_header, format_status};
use crate::connection::{
    ConfigurationStore, Connection, ConnectionConfig, ConnectionHandle, ConnectionManager,
    ConnectionRegistry,
};
use crate::error::Result;
use std::io::Write;
use std::sync::Arc;

/// Connection type added at runtime to show the registry is open for extension
struct CassandraConnection {
    host: String,
}

impl CassandraConnection {
    fn create(config: ConnectionConfig) -> Result<ConnectionHandle> {
        Ok(Box::new(Self {
            host: config.require_str("cassandra", "host")?,
        }))
    }
}

impl Connection for CassandraConnection {
    fn backend(&self) -> &str {
        "cassandra"
    }

    fn connect(&self) -> String {
        format!("Cassandra: Connected to cluster at {}", self.host)
    }

    fn execute_query(&self, query: &str) -> String {
        format!("Cassandra executed CQL: {}", query)
    }

    fn disconnect(&self) -> String {
        "Cassandra connection closed".to_string()
    }
}

/// Run both walk-throughs against the given store and registry
pub fn run(
    store: Arc<ConfigurationStore>,
    registry: Arc<ConnectionRegistry>,
    use_color: bool,
    out: &mut dyn Write,
) -> Result<()> {
    demonstrate_factory(store, Arc::clone(&registry), use_color, out)?;
    demonstrate_extensibility(&registry, use_color, out)
}

fn demonstrate_factory(
    store: Arc<ConfigurationStore>,
    registry: Arc<ConnectionRegistry>,
    use_color: bool,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(out, "{}\n", format_header("Factory Pattern Demonstration", use_color))?;

    let dev_manager = ConnectionManager::new("development", Arc::clone(&store), Arc::clone(&registry));

    let mysql = dev_manager.get_connection("mysql")?;
    writeln!(out, "{}", format_status(&mysql.connect(), use_color))?;
    writeln!(out, "{}\n", mysql.execute_query("SELECT * FROM users"))?;

    let mongo = dev_manager.get_connection("mongodb")?;
    writeln!(out, "{}", format_status(&mongo.connect(), use_color))?;
    writeln!(out, "{}\n", mongo.execute_query("db.users.find({})"))?;

    let prod_manager = ConnectionManager::new("production", store, registry);

    let postgres = prod_manager.get_connection("postgresql")?;
    writeln!(out, "{}", format_status(&postgres.connect(), use_color))?;
    writeln!(out, "{}\n", postgres.execute_query("SELECT * FROM products"))?;

    writeln!(out, "\n{}", format_header("Cleanup", use_color))?;
    for manager in [&dev_manager, &prod_manager] {
        for (type_id, message) in manager.close_all()? {
            writeln!(out, "Closing {}: {}", type_id, message)?;
        }
    }

    Ok(())
}

fn demonstrate_extensibility(
    registry: &ConnectionRegistry,
    use_color: bool,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(out, "\n{}\n", format_header("Demonstrating Extensibility", use_color))?;

    registry.register("cassandra", CassandraConnection::create)?;

    let config = ConnectionConfig::new()
        .with("host", "cassandra.company.com")
        .with("port", 9042)
        .with("keyspace", "my_keyspace");

    let cassandra = registry.create("cassandra", config)?;
    writeln!(out, "{}", format_status(&cassandra.connect(), use_color))?;
    writeln!(out, "{}", cassandra.execute_query("SELECT * FROM users"))?;
    writeln!(out, "{}", cassandra.disconnect())?;

    Ok(())
}
