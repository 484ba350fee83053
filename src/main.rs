//! Main entry point for the connfactory CLI tool
//!
//! Runs the factory demonstration or drives individual connection types
//! through the registry and configuration store.

use clap::Parser;
use connfactory::cli::Cli;
use connfactory::Result;
use log::info;
use std::process;

fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG still wins over --verbose
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    info!("Starting connfactory v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli) {
        eprintln!("{}", cli.error_message(&e));
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    // Load configuration
    let config = cli.load_config()?;

    // Execute CLI logic
    cli.run(config)
}
