//! Command-line options

use clap::Parser;
use migjson_generator::RunMode;
use std::path::PathBuf;

/// Create multiple migration classes from a single JSON file
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "make-migration-json", version, long_about = None)]
pub struct Cli {
    /// The file path to the JSON schema
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Filter by table name, example: --only=cats,birds
    #[arg(long, value_name = "TABLES")]
    pub only: Option<String>,

    /// Validate schema in json file and report any problems
    #[arg(long)]
    pub validate: bool,

    /// Undo and remove all files generated from last command
    #[arg(long)]
    pub undo: bool,

    /// Do not create an "undo" file
    #[arg(long = "disableundo")]
    pub disable_undo: bool,

    /// Tool configuration file (default: ./migration-json.toml when present)
    #[arg(long, value_name = "PATH", env = "MIGRATION_JSON_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show debug logs
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The action selected by the flags. `--undo` wins over `--validate`.
    pub fn mode(&self) -> RunMode {
        if self.undo {
            RunMode::Undo
        } else if self.validate {
            RunMode::Validate
        } else {
            RunMode::Generate {
                disable_undo: self.disable_undo,
            }
        }
    }

    /// Table names given to `--only`
    pub fn only_tables(&self) -> Vec<String> {
        self.only.as_deref().map(parse_only).unwrap_or_default()
    }

    /// Check if an action flag was given without `--file`
    pub fn is_missing_file(&self) -> bool {
        self.file.is_none() && (self.undo || self.validate)
    }
}

/// Split a comma list, trimming items and dropping empty ones
pub fn parse_only(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
