//! Error types for migration-json
//!
//! One error enum covers the whole pipeline: reading the JSON schema file,
//! dispatching to the external migration generator, and the undo manifest
//! bookkeeping. Whether an error aborts the run or is only reported is
//! decided by [`EngineError::is_fatal`].

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for migration-json
#[derive(Debug, Error)]
pub enum EngineError {
    // ========================================================================
    // Source Document Errors
    // ========================================================================
    /// The JSON schema file does not exist
    #[error("JSON file not found: {0}")]
    FileNotFound(PathBuf),

    /// The JSON schema file exists but could not be read
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// The JSON schema file is not valid JSON
    #[error(
        "Invalid JSON detected: Check that your json file does not contain invalid syntax: {path} ({message})"
    )]
    InvalidJson { path: PathBuf, message: String },

    /// Valid JSON, but not shaped like `{table: {field: "spec"}}`
    #[error("Invalid schema document: {0}")]
    InvalidDocument(String),

    /// Valid JSON with no tables in it
    #[error("No data found in json file: It seems you have no data in: {0}")]
    EmptyDocument(PathBuf),

    // ========================================================================
    // Undo Errors
    // ========================================================================
    /// Undo was requested but the manifest is missing or corrupt
    #[error("Could not read undo file '{path}': {message}")]
    ManifestUnreadable { path: PathBuf, message: String },

    /// A file listed in the manifest could not be removed
    #[error("Could not delete: {path} ({message})")]
    FileUndeletable { path: PathBuf, message: String },

    /// The manifest could not be written next to the source file
    #[error("Could not create undo file, not enough permissions perhaps?: {path} ({message})")]
    DirectoryUnwritable { path: PathBuf, message: String },

    /// The generation run left no new files in the watched directories
    #[error("No generated files created")]
    NoGeneratedFiles,

    // ========================================================================
    // External Generator Errors
    // ========================================================================
    /// The external generator ran but reported failure
    #[error("Generator command `{command}` failed: {status}")]
    GeneratorFailed { command: String, status: String },

    /// The external generator could not be started at all
    #[error("Could not run generator program '{program}': {message}")]
    GeneratorSpawn { program: String, message: String },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read
    #[error("Failed to read config file '{path}': {message}")]
    ConfigRead { path: PathBuf, message: String },

    // ========================================================================
    // Wrapped Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    /// Create an invalid document error
    pub fn invalid_document(msg: impl Into<String>) -> Self {
        EngineError::InvalidDocument(msg.into())
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        EngineError::InvalidConfig(msg.into())
    }

    /// Check if this error aborts the requested action.
    ///
    /// Non-fatal errors are reported to the user while the rest of the run
    /// carries on.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            EngineError::FileUndeletable { .. }
                | EngineError::DirectoryUnwritable { .. }
                | EngineError::NoGeneratedFiles
        )
    }
}

/// Result type alias using EngineError
pub type EngineResult<T> = Result<T, EngineError>;

// ============================================================================
// Tests
// ============================================================================
