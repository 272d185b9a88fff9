//! # Run Orchestrator
//!
//! The `Orchestrator` is the top-level entry point of a run. It takes a
//! [`RunConfig`] and a [`MigrationGenerator`] and performs exactly one of the
//! three actions selected by [`RunMode`].
//!
//! ## Pipeline
//!
//! ```text
//! RunConfig { file, only, mode, watch_dirs }
//!         │
//!         ├── Undo      ──► manifest::undo()                 → UndoReport
//!         ├── Validate  ──► load_document() → validator      → ValidationOutcome
//!         └── Generate  ──► RunStart::now()
//!                           load_document() → translate()
//!                           dispatch_all()      (one generator call per entry)
//!                           scan_generated_files()
//!                           write_manifest()                 → GenerationReport
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use migjson_generator::{ArtisanGenerator, Orchestrator, RunConfig};
//!
//! let config = RunConfig::new("database/schema.json");
//! let outcome = Orchestrator::new(config, ArtisanGenerator::default()).run()?;
//! ```

use migjson_core::{EngineError, EngineResult};
use migjson_schema::{
    MigrationEntry, SchemaDocument, SchemaValidator, ValidationReport, load_document, translate,
};
use std::path::PathBuf;

use crate::dispatch::{MigrationGenerator, dispatch_all};
use crate::manifest::{self, UndoReport};
use crate::tracking::{RunStart, scan_generated_files};
use crate::{RunConfig, RunMode};

// ============================================================================
// Outcomes
// ============================================================================

/// What happened to the undo manifest at the end of a generation run
#[derive(Debug)]
pub enum ManifestOutcome {
    /// Manifest written at this path
    Written(PathBuf),

    /// `--disableundo` was given
    Disabled,

    /// Not written; `NoGeneratedFiles` or `DirectoryUnwritable`
    Skipped(EngineError),
}

/// Result of a generation run
#[derive(Debug)]
pub struct GenerationReport {
    /// Migrations handed to the generator, in order
    pub migrations: Vec<MigrationEntry>,

    /// Files attributed to this run
    pub generated_files: Vec<PathBuf>,

    /// Undo manifest status
    pub manifest: ManifestOutcome,
}

/// Result of a validation run
#[derive(Debug)]
pub struct ValidationOutcome {
    /// The validated document, kept for echoing offending sections
    pub document: SchemaDocument,

    /// Problems found
    pub report: ValidationReport,
}

/// Result of any run
#[derive(Debug)]
pub enum RunOutcome {
    Generated(GenerationReport),
    Validated(ValidationOutcome),
    Undone(UndoReport),
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Drives one run over a JSON schema file
#[derive(Debug)]
pub struct Orchestrator<G> {
    config: RunConfig,
    generator: G,
}

impl<G: MigrationGenerator> Orchestrator<G> {
    /// Create an orchestrator
    pub fn new(config: RunConfig, generator: G) -> Self {
        Self { config, generator }
    }

    /// The generator
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Perform the action selected by the configured mode
    pub fn run(&mut self) -> EngineResult<RunOutcome> {
        match self.config.mode {
            RunMode::Undo => self.undo().map(RunOutcome::Undone),
            RunMode::Validate => self.validate().map(RunOutcome::Validated),
            RunMode::Generate { .. } => self.generate().map(RunOutcome::Generated),
        }
    }

    /// Delete the files recorded by the last generation run
    pub fn undo(&self) -> EngineResult<UndoReport> {
        let path = self.config.manifest_path();
        tracing::info!("Undoing files listed in {}", path.display());
        manifest::undo(&path)
    }

    /// Validate the document without generating anything
    pub fn validate(&self) -> EngineResult<ValidationOutcome> {
        let document = self.load_non_empty()?;
        let report = SchemaValidator::new(self.config.catalog.clone()).validate(&document);

        tracing::info!(
            "Validated {} table(s), {} problem(s)",
            document.len(),
            report.error_count()
        );
        Ok(ValidationOutcome { document, report })
    }

    /// Generate migrations and record the resulting files
    pub fn generate(&mut self) -> EngineResult<GenerationReport> {
        let start = RunStart::now();

        let document = self.load_non_empty()?;
        let migrations = translate(&document, &self.config.only);
        tracing::info!("Dispatching {} migration(s)", migrations.len());

        dispatch_all(&mut self.generator, &migrations)?;

        let disable_undo = matches!(self.config.mode, RunMode::Generate { disable_undo: true });
        if disable_undo {
            return Ok(GenerationReport {
                migrations,
                generated_files: Vec::new(),
                manifest: ManifestOutcome::Disabled,
            });
        }

        let generated_files = scan_generated_files(&self.config.watch_dirs, start);
        let manifest = self.record(&generated_files)?;

        Ok(GenerationReport {
            migrations,
            generated_files,
            manifest,
        })
    }

    /// Write the undo manifest. Non-fatal problems are kept in the outcome.
    fn record(&self, files: &[PathBuf]) -> EngineResult<ManifestOutcome> {
        let path = self.config.manifest_path();
        let written = if files.is_empty() {
            Err(EngineError::NoGeneratedFiles)
        } else {
            manifest::write_manifest(&path, files)
        };

        match written {
            Ok(()) => Ok(ManifestOutcome::Written(path)),
            Err(e) if !e.is_fatal() => {
                tracing::warn!("Undo manifest not written: {}", e);
                Ok(ManifestOutcome::Skipped(e))
            }
            Err(e) => Err(e),
        }
    }

    fn load_non_empty(&self) -> EngineResult<SchemaDocument> {
        let document = load_document(&self.config.file)?;
        if document.is_empty() {
            return Err(EngineError::EmptyDocument(self.config.file.clone()));
        }
        Ok(document)
    }
}

// ============================================================================
// Tests
// ============================================================================
