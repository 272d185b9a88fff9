//! Translation of schema documents into migration entries
//!
//! Every table becomes one [`MigrationEntry`]. Normal tables carry the joined
//! `field:spec` schema line handed to `make:migration:schema --schema`; pivot
//! tables carry the two joined table names handed to `make:migration:pivot`.

use crate::document::{SchemaDocument, TableDefinition};

/// Suffix marking a pivot (join) table, e.g. `posts_tags_pivot`
pub const PIVOT_SUFFIX: &str = "_pivot";

/// Substring marking a table name that is already a migration name
pub const TABLE_MARKER: &str = "_table";

// ============================================================================
// Migration Entries
// ============================================================================

/// What gets handed to the external generator for one migration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationPayload {
    /// `"field:type, field:type:modifier, ..."`, empty for a table without fields
    Schema(String),

    /// The two tables joined by a pivot migration
    Pivot { first: String, second: String },
}

impl std::fmt::Display for MigrationPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MigrationPayload::Schema(line) => write!(f, "{}", line),
            MigrationPayload::Pivot { first, second } => write!(f, "{} {}", first, second),
        }
    }
}

/// One migration derived from one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationEntry {
    /// Migration name, e.g. `create_users_table`
    pub name: String,

    /// Generator input
    pub payload: MigrationPayload,
}

// ============================================================================
// Translation
// ============================================================================

/// Derive a migration name from a table name.
///
/// Names ending in `_pivot` and names already containing `_table` are kept
/// as they are; anything else becomes `create_<table>_table`.
pub fn derive_migration_name(table_name: &str) -> String {
    if table_name.ends_with(PIVOT_SUFFIX) || table_name.contains(TABLE_MARKER) {
        return table_name.to_string();
    }

    format!("create_{}_table", table_name)
}

/// Translate a document into migration entries, in document order.
///
/// When `only` is non-empty, tables whose raw name is not listed are skipped.
/// Matching is exact and case-sensitive.
pub fn translate(document: &SchemaDocument, only: &[String]) -> Vec<MigrationEntry> {
    document
        .tables()
        .iter()
        .filter(|table| only.is_empty() || only.iter().any(|name| *name == table.name))
        .map(translate_table)
        .collect()
}

fn translate_table(table: &TableDefinition) -> MigrationEntry {
    let name = derive_migration_name(&table.name);

    let payload = if name.ends_with(PIVOT_SUFFIX) {
        let mut parts = name.splitn(3, '_');
        let first = parts.next().unwrap_or_default().to_string();
        let second = parts.next().unwrap_or_default().to_string();
        MigrationPayload::Pivot { first, second }
    } else {
        let line = table
            .fields
            .iter()
            .map(|f| format!("{}:{}", f.name, f.spec))
            .collect::<Vec<_>>()
            .join(", ");
        MigrationPayload::Schema(line)
    };

    tracing::debug!("Translated table '{}' into migration '{}'", table.name, name);
    MigrationEntry { name, payload }
}

// ============================================================================
// Tests
// ============================================================================
