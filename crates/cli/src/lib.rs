//! # migration-json CLI
//!
//! Command-line interface for migration-json.
//!
//! One command, `make-migration-json`, with three mutually exclusive actions:
//!
//! - *(default)* generate migrations from `--file` and write an undo file
//! - `--validate` - report field-spec problems without generating anything
//! - `--undo` - delete the files created by the last generation run
//!
//! Without `--file` or an action flag, the help screen is shown.
//!

pub mod args;
pub mod config;
pub mod render;

pub use args::{Cli, parse_only};
pub use config::{DEFAULT_CONFIG_FILE, ToolConfig};

use clap::CommandFactory;
use migjson_core::{CATALOG_VERSION, EngineError};
use migjson_generator::{Orchestrator, RunConfig};

use render::Line;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Exit status of a completed run
pub const EXIT_SUCCESS: u8 = 0;

/// Exit status when the requested action was aborted
pub const EXIT_ABORTED: u8 = 1;

/// Execute a parsed command line and return the process exit status.
///
/// Problems with the input are reported on the console; only terminal IO
/// failures are returned as errors.
pub fn execute(cli: Cli) -> anyhow::Result<u8> {
    if cli.is_missing_file() {
        render::print(&[Line::error("The --file option is required for --undo and --validate")]);
        return Ok(EXIT_ABORTED);
    }

    let Some(file) = cli.file.clone() else {
        Cli::command().print_help()?;
        return Ok(EXIT_SUCCESS);
    };

    let tool_config = match ToolConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            render::print(&render::render_error(&e));
            return Ok(exit_status(&e));
        }
    };

    let catalog = tool_config.catalog();
    tracing::debug!(
        "Column catalog {} with {} column type(s)",
        CATALOG_VERSION,
        catalog.column_type_count()
    );

    let config = RunConfig::new(file)
        .with_only(cli.only_tables())
        .with_mode(cli.mode())
        .with_watch_dirs(tool_config.watch_dirs())
        .with_catalog(catalog);
    let manifest = config.manifest_path();

    tracing::debug!("Running {:?} on {}", config.mode, config.file.display());
    let mut orchestrator = Orchestrator::new(config, tool_config.generator());

    match orchestrator.run() {
        Ok(outcome) => {
            render::print(&render::render_outcome(&outcome, &manifest));
            Ok(EXIT_SUCCESS)
        }
        Err(e) => {
            tracing::debug!("Run failed: {:?}", e);
            render::print(&render::render_error(&e));
            Ok(exit_status(&e))
        }
    }
}

/// Exit status for an error that ended the run
pub fn exit_status(err: &EngineError) -> u8 {
    if err.is_fatal() {
        EXIT_ABORTED
    } else {
        EXIT_SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "migjson_cli");
    }

    #[test]
    fn test_help_without_file() {
        let code = execute(Cli::default()).unwrap();
        assert_eq!(code, EXIT_SUCCESS);
    }

    #[test]
    fn test_exit_status() {
        let missing = EngineError::FileNotFound("schema.json".into());
        assert_eq!(exit_status(&missing), EXIT_ABORTED);
        assert_eq!(exit_status(&EngineError::NoGeneratedFiles), EXIT_SUCCESS);
    }

    #[test]
    fn test_action_without_file() {
        let cli = Cli {
            validate: true,
            ..Default::default()
        };
        assert_eq!(execute(cli).unwrap(), EXIT_ABORTED);
    }
}
