//! Trait definitions for the connection module
//!
//! This module defines the common interface that all connection implementations must follow.

/// Common trait for all connection implementations
///
/// Nothing here touches the network: every operation turns the connection's
/// own settings into a status message.
pub trait Connection {
    /// Backend type name, e.g. "mysql"
    fn backend(&self) -> &str;

    /// Simulate opening the connection
    fn connect(&self) -> String;

    /// Echo a query with backend-specific framing
    fn execute_query(&self, query: &str) -> String;

    /// Simulate closing the connection
    fn disconnect(&self) -> String;

    /// Connection URL built from the configured options, if the backend has one
    fn connection_string(&self) -> Option<String> {
        None
    }
}
