//! # migration-json core
//!
//! Error handling and the schema-builder catalog shared by every
//! migration-json crate:
//!
//! - **Errors**: `EngineError` and `EngineResult` covering document loading,
//!   generator dispatch and undo bookkeeping
//! - **Catalog**: versioned whitelist of column types, modifiers and index
//!   keywords used to validate field specs
//!

pub mod catalog;
pub mod error;

// Re-export commonly used items at crate root
pub use catalog::{CATALOG_VERSION, Catalog};
pub use error::{EngineError, EngineResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
