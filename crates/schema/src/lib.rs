//! # migration-json schema
//!
//! The JSON schema document and everything done to it before the external
//! generator runs.
//!
//! ## Core Concepts
//!
//! - **SchemaDocument**: table name → field name → field spec, in file order
//! - **Field spec**: `type[(params)][:modifier]*`, e.g. `string(50):nullable`
//! - **MigrationEntry**: one migration per table, either a schema line or a
//!   pivot between two tables (`posts_tags_pivot`)
//! - **ValidationReport**: table → field → kind → message
//!

pub mod document;
pub mod translate;
pub mod validation;

// Re-export commonly used types at crate root
pub use document::{
    FieldDefinition, SchemaDocument, TableDefinition, load_document, parse_document,
};
pub use translate::{
    MigrationEntry, MigrationPayload, PIVOT_SUFFIX, TABLE_MARKER, derive_migration_name,
    translate,
};
pub use validation::{
    ErrorKind, FieldErrors, SchemaValidator, TableErrors, ValidationReport,
    is_known_column_type, is_known_modifier_or_index, normalize_type, validate,
};

pub use migjson_core::{Catalog, EngineError, EngineResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
