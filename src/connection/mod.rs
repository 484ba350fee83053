//! Connection module for connfactory
//!
//! This module decouples constructing database connections from using them.
//! Every backend implements the common trait, the registry builds them by
//! type name, and the manager hands out cached, environment-scoped instances.
//!
//! # Module Organization
//!
//! - `types`: Common type definitions (OptionValue, ConnectionConfig, handles)
//! - `traits`: Trait definitions (Connection trait)
//! - `factory`: Registry-based factory for creating connections
//! - `store`: Per-environment configuration store
//! - `manager`: Connection manager caching one connection per type
//! - Connection implementations: mysql, postgresql, mongodb, redis

// Core modules
pub mod types;
pub mod traits;
pub mod factory;
pub mod store;
pub mod manager;

// Connection implementation modules
pub mod mongodb;
pub mod mysql;
pub mod postgresql;
pub mod redis;

// Re-export core types and traits for convenience
pub use types::{ConnectionConfig, ConnectionHandle, ConnectionInfo, OptionValue, SharedConnection};
pub use traits::Connection;
pub use factory::{ConnectionRegistry, Constructor};
pub use store::ConfigurationStore;
pub use manager::ConnectionManager;

// Re-export connection implementations
pub use mongodb::MongoDbConnection;
pub use mysql::MySqlConnection;
pub use postgresql::PostgreSqlConnection;
pub use redis::RedisConnection;
