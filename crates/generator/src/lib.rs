//! # migration-json generator
//!
//! Run orchestration for migration-json.
//!
//! This crate drives one invocation of the tool: it hands every migration of
//! a schema document to the external generator, works out which files the
//! generator wrote, and keeps the undo manifest that lets a later run delete
//! them again.
//!
//! ## Features
//!
//! - **Dispatch**: schema and pivot migrations through [`MigrationGenerator`]
//! - **Tracking**: files in watched directories modified since run start
//! - **Undo**: `<source>.undo.json` manifest written after generation and
//!   consumed by the next undo run
//! - **Validation**: dry-run report without calling the generator
//!

// ============================================================================
// Modules
// ============================================================================

pub mod dispatch;
pub mod manifest;
pub mod orchestrator;
pub mod tracking;

// ============================================================================
// Re-exports
// ============================================================================

pub use dispatch::{ArtisanGenerator, MigrationGenerator, dispatch, dispatch_all};
pub use manifest::{UndoReport, manifest_path};
pub use orchestrator::{
    GenerationReport, ManifestOutcome, Orchestrator, RunOutcome, ValidationOutcome,
};
pub use tracking::{DEFAULT_WATCH_DIRS, RunStart, scan_generated_files};

use migjson_core::Catalog;
use std::path::PathBuf;

// ============================================================================
// RunMode
// ============================================================================

/// The action a run performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Call the generator for every migration, then record the new files
    Generate { disable_undo: bool },

    /// Report field-spec problems only
    Validate,

    /// Delete the files recorded by the last generation run
    Undo,
}

impl Default for RunMode {
    fn default() -> Self {
        RunMode::Generate {
            disable_undo: false,
        }
    }
}

// ============================================================================
// RunConfig
// ============================================================================

/// Configuration of one run. Built once, then only read.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// JSON schema file
    pub file: PathBuf,

    /// Raw table names to restrict generation to (empty means all)
    pub only: Vec<String>,

    /// Selected action
    pub mode: RunMode,

    /// Directories scanned for generated files
    pub watch_dirs: Vec<PathBuf>,

    /// Column type and modifier whitelist used by validation
    pub catalog: Catalog,
}

impl RunConfig {
    /// Create a configuration with default values for `file`
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            only: Vec::new(),
            mode: RunMode::default(),
            watch_dirs: DEFAULT_WATCH_DIRS.iter().map(PathBuf::from).collect(),
            catalog: Catalog::builtin(),
        }
    }

    /// Restrict generation to these table names
    pub fn with_only(mut self, only: Vec<String>) -> Self {
        self.only = only;
        self
    }

    /// Set the action
    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the directories scanned for generated files
    pub fn with_watch_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.watch_dirs = dirs;
        self
    }

    /// Set the validation catalog
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Path of the undo manifest belonging to the source file
    pub fn manifest_path(&self) -> PathBuf {
        manifest::manifest_path(&self.file)
    }
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Tests
// ============================================================================
