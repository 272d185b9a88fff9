//! migration-json
//!
//! Create multiple Laravel migration classes from a single JSON file.
//!
//! This is the entry point of the `make-migration-json` command.

use clap::Parser;
use migjson_cli::Cli;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("make-migration-json {}", migjson_cli::VERSION);

    let status = migjson_cli::execute(cli)?;
    Ok(ExitCode::from(status))
}
