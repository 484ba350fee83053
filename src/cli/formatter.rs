//! Output formatting for the CLI

use crate::connection::{ConnectionConfig, ConnectionInfo};
use serde::Serialize;

#[cfg(feature = "colored-output")]
use colored::Colorize;

/// Result of a simulated query
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutput {
    pub query: String,
    pub result: String,
}

/// Everything reported for one connection by `connect`
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionReport {
    pub environment: String,
    #[serde(flatten)]
    pub info: ConnectionInfo,
    pub queries: Vec<QueryOutput>,
}

/// Section header, e.g. "=== Cleanup ==="
pub fn format_header(title: &str, use_color: bool) -> String {
    let header = format!("=== {} ===", title);
    if use_color {
        #[cfg(feature = "colored-output")]
        {
            return header.bold().to_string();
        }
    }
    header
}

/// Status line coming back from a connection
pub fn format_status(message: &str, use_color: bool) -> String {
    if use_color {
        #[cfg(feature = "colored-output")]
        {
            return message.green().to_string();
        }
    }
    message.to_string()
}

pub fn format_error(message: &str, use_color: bool) -> String {
    let line = format!("Error: {}", message);
    if use_color {
        #[cfg(feature = "colored-output")]
        {
            return line.red().to_string();
        }
    }
    line
}

/// Plain-text rendering of a connection report
pub fn format_report(report: &ConnectionReport, use_color: bool) -> String {
    let mut lines = vec![format_status(&report.info.status, use_color)];
    if let Some(ref url) = report.info.connection_string {
        lines.push(format!("  url: {}", url));
    }
    for query in &report.queries {
        lines.push(query.result.clone());
    }
    lines.join("\n")
}

/// Indented `key: value` listing of a configuration
pub fn format_config(environment: &str, type_id: &str, config: &ConnectionConfig) -> String {
    let mut out = format!("{} ({}):", type_id, environment);
    for (key, value) in config.iter() {
        out.push_str(&format!("\n  {}: {}", key, value));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_report() {
        let report = ConnectionReport {
            environment: "development".to_string(),
            info: ConnectionInfo {
                backend: "redis".to_string(),
                connection_string: Some("redis://localhost:6379/0".to_string()),
                status: "Redis: Connected to localhost:6379".to_string(),
            },
            queries: vec![QueryOutput {
                query: "PING".to_string(),
                result: "Redis executed: PING".to_string(),
            }],
        };

        assert_eq!(
            format_report(&report, false),
            "Redis: Connected to localhost:6379\n  url: redis://localhost:6379/0\nRedis executed: PING"
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["backend"], "redis");
        assert_eq!(json["queries"][0]["query"], "PING");
    }

    #[test]
    fn test_format_config() {
        let config = ConnectionConfig::new().with("host", "localhost").with("port", 6379);
        assert_eq!(
            format_config("development", "redis", &config),
            "redis (development):\n  host: localhost\n  port: 6379"
        );
    }

    #[test]
    fn test_uncolored_lines() {
        assert_eq!(format_header("Cleanup", false), "=== Cleanup ===");
        assert_eq!(format_error("boom", false), "Error: boom");
    }
}
