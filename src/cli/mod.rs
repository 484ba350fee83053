//! CLI module for connfactory
//!
//! This module handles command line argument parsing and drives the
//! connection manager on behalf of the user.

pub mod demo;
pub mod formatter;

use crate::config::AppConfig;
use crate::connection::{
    ConfigurationStore, ConnectionInfo, ConnectionManager, ConnectionRegistry,
};
use crate::error::{ConnFactoryError, Result};
use crate::utils::path::expand_tilde;
use clap::{Parser, Subcommand};
use formatter::{ConnectionReport, QueryOutput};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "connfactory")]
#[command(version, about = "Factory pattern demonstration with simulated database connections")]
#[command(long_about = "connfactory builds simulated database connections through a registry-based factory.\n\n\
    Connection settings come from a per-environment configuration store; nothing touches the network.\n\n\
    Examples:\n  \
    $ connfactory\n  \
    $ connfactory connect mysql redis -q \"SELECT 1\"\n  \
    $ connfactory --env production show postgresql\n  \
    $ connfactory --json list")]
pub struct Cli {
    /// Environment to use (overrides the config file and CONNFACTORY_ENV)
    #[arg(short, long, global = true)]
    pub env: Option<String>,

    /// Path to a config file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output JSON
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Walk through the factory and extensibility demonstrations (default)
    Demo,

    /// Connect to one or more connection types and run queries
    Connect {
        /// Connection types, e.g. mysql redis
        #[arg(required = true, value_name = "TYPE")]
        types: Vec<String>,

        /// Query to run on every connection (repeatable)
        #[arg(short, long = "query", value_name = "QUERY")]
        queries: Vec<String>,
    },

    /// List environments and connection types
    List,

    /// Show the configuration of a connection type
    Show {
        #[arg(value_name = "TYPE")]
        type_id: String,
    },
}

impl Cli {
    /// Load the application configuration this invocation asks for
    ///
    /// An explicit `--config` must load; the default location falls back to
    /// built-in defaults with a warning.
    pub fn load_config(&self) -> Result<AppConfig> {
        match self.config {
            Some(ref path) => AppConfig::load_from(&expand_tilde(&path.to_string_lossy())),
            None => Ok(AppConfig::load().unwrap_or_else(|e| {
                log::warn!("Failed to load config: {}, using defaults", e);
                AppConfig::default()
            })),
        }
    }

    pub fn run(&self, mut config: AppConfig) -> Result<()> {
        // Apply CLI options to config
        if let Some(ref env) = self.env {
            config.general.environment = env.clone();
        }
        if self.json {
            config.output.json = true;
        }
        if self.no_color || !atty::is(atty::Stream::Stdout) {
            config.output.enable_colors = false;
        }
        if self.verbose {
            config.global.verbose = true;
        }

        let store = Arc::new(config.configuration_store());
        let registry = Arc::new(ConnectionRegistry::with_builtins());

        match self.command.clone().unwrap_or(Command::Demo) {
            Command::Demo => {
                let stdout = io::stdout();
                demo::run(store, registry, config.output.enable_colors, &mut stdout.lock())
            }
            Command::Connect { types, queries } => {
                let manager = ConnectionManager::new(&config.general.environment, store, registry);
                self.handle_connect(&manager, &types, &queries, &config)
            }
            Command::List => self.handle_list(&config, &store, &registry),
            Command::Show { type_id } => self.handle_show(&config, &store, &type_id),
        }
    }

    /// Connect each type, run the queries, then close everything
    fn handle_connect(
        &self,
        manager: &ConnectionManager,
        types: &[String],
        queries: &[String],
        config: &AppConfig,
    ) -> Result<()> {
        let use_color = config.output.enable_colors;
        let mut reports = Vec::new();

        for type_id in types {
            // the caller reports the error; only release what was opened
            let conn = match manager.get_connection(type_id) {
                Ok(conn) => conn,
                Err(e) => {
                    manager.close_all()?;
                    return Err(e);
                }
            };

            let report = ConnectionReport {
                environment: manager.environment().to_string(),
                info: ConnectionInfo::from_connection(&*conn),
                queries: queries
                    .iter()
                    .map(|q| QueryOutput {
                        query: q.clone(),
                        result: conn.execute_query(q),
                    })
                    .collect(),
            };

            if !config.output.json {
                println!("{}\n", formatter::format_report(&report, use_color));
            }
            reports.push(report);
        }

        if config.output.json {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }

        for (type_id, message) in manager.close_all()? {
            if !config.output.json {
                println!("Closing {}: {}", type_id, message);
            }
        }

        Ok(())
    }

    /// One-line error report for stderr
    pub fn error_message(&self, err: &ConnFactoryError) -> String {
        let use_color = !self.no_color && atty::is(atty::Stream::Stderr);
        formatter::format_error(&err.to_string(), use_color)
    }

    fn handle_list(
        &self,
        config: &AppConfig,
        store: &ConfigurationStore,
        registry: &ConnectionRegistry,
    ) -> Result<()> {
        let registered = registry.registered_types();

        if config.output.json {
            let environments: serde_json::Map<String, serde_json::Value> = store
                .environments()
                .into_iter()
                .map(|env| {
                    let types = store.backend_types(&env).unwrap_or_default();
                    (env, serde_json::json!(types))
                })
                .collect();
            let value = serde_json::json!({
                "environments": environments,
                "registered_types": registered,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
            return Ok(());
        }

        println!("Environments:");
        for env in store.environments() {
            let marker = if env == config.general.environment { "*" } else { " " };
            println!("{} {}: {}", marker, env, store.backend_types(&env)?.join(", "));
        }
        println!("\nRegistered types: {}", registered.join(", "));
        if let Some(ref path) = config.global.config_path {
            println!("Config file: {}", path.display());
        }
        Ok(())
    }

    fn handle_show(&self, config: &AppConfig, store: &ConfigurationStore, type_id: &str) -> Result<()> {
        let environment = &config.general.environment;
        let connection_config = store.get_config(environment, type_id)?;

        if config.output.json {
            println!("{}", serde_json::to_string_pretty(&connection_config)?);
        } else {
            println!("{}", formatter::format_config(environment, type_id, &connection_config));
        }
        Ok(())
    }
}
