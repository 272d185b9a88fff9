//! Schema-builder catalog
//!
//! Static whitelist of the column types, column modifiers and index keywords
//! understood by the Laravel schema builder. The generator downstream turns
//! each field spec token into one of these builder calls, so validation only
//! has to check membership here.
//!
//! The tables are versioned with [`CATALOG_VERSION`]; additional names can be
//! layered on top at runtime through [`Catalog::with_extra_column_types`] and
//! [`Catalog::with_extra_modifiers`].

use std::collections::BTreeSet;

/// Schema-builder release the built-in tables mirror
pub const CATALOG_VERSION: &str = "laravel-5.5";

// ============================================================================
// Built-in Tables
// ============================================================================

/// Column type methods of the schema builder (case-sensitive)
pub const COLUMN_TYPES: &[&str] = &[
    "bigIncrements",
    "bigInteger",
    "binary",
    "boolean",
    "char",
    "date",
    "dateTime",
    "dateTimeTz",
    "decimal",
    "double",
    "enum",
    "float",
    "geometry",
    "geometryCollection",
    "increments",
    "integer",
    "ipAddress",
    "json",
    "jsonb",
    "lineString",
    "longText",
    "macAddress",
    "mediumIncrements",
    "mediumInteger",
    "mediumText",
    "morphs",
    "multiLineString",
    "multiPoint",
    "multiPolygon",
    "nullableMorphs",
    "nullableTimestamps",
    "point",
    "polygon",
    "rememberToken",
    "smallIncrements",
    "smallInteger",
    "softDeletes",
    "softDeletesTz",
    "string",
    "text",
    "time",
    "timeTz",
    "timestamp",
    "timestampTz",
    "timestamps",
    "timestampsTz",
    "tinyIncrements",
    "tinyInteger",
    "unsignedBigInteger",
    "unsignedInteger",
    "unsignedMediumInteger",
    "unsignedSmallInteger",
    "unsignedTinyInteger",
    "uuid",
    "year",
];

/// Column modifiers of the schema grammars, lower-cased
pub const COLUMN_MODIFIERS: &[&str] = &[
    "after",
    "autoincrement",
    "charset",
    "collate",
    "comment",
    "default",
    "first",
    "increment",
    "nullable",
    "srid",
    "storedas",
    "unsigned",
    "usecurrent",
    "virtualas",
];

/// Index keywords accepted in a field spec
pub const INDEX_KEYWORDS: &[&str] = &["primary", "unique", "index", "foreign"];

// ============================================================================
// Catalog
// ============================================================================

/// Lookup tables for column types and modifier/index tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    column_types: BTreeSet<String>,
    modifiers: BTreeSet<String>,
}

impl Catalog {
    /// Create the catalog from the built-in tables
    pub fn builtin() -> Self {
        Self {
            column_types: COLUMN_TYPES.iter().map(|s| s.to_string()).collect(),
            modifiers: COLUMN_MODIFIERS
                .iter()
                .chain(INDEX_KEYWORDS)
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Add column types on top of the built-in ones
    pub fn with_extra_column_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.column_types.extend(types.into_iter().map(Into::into));
        self
    }

    /// Add modifiers on top of the built-in ones (stored lower-cased)
    pub fn with_extra_modifiers<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifiers
            .extend(modifiers.into_iter().map(|m| m.into().to_lowercase()));
        self
    }

    /// Check if `name` is a column type. Exact, case-sensitive match.
    pub fn has_column_type(&self, name: &str) -> bool {
        self.column_types.contains(name)
    }

    /// Check if `name` is a modifier or index keyword. Case-insensitive.
    pub fn has_modifier_or_index(&self, name: &str) -> bool {
        self.modifiers.contains(&name.to_lowercase())
    }

    /// Number of known column types
    pub fn column_type_count(&self) -> usize {
        self.column_types.len()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_column_types() {
        let catalog = Catalog::builtin();
        for name in ["string", "integer", "text", "timestamp", "boolean", "dateTime"] {
            assert!(catalog.has_column_type(name), "missing {}", name);
        }
        assert!(!catalog.has_column_type("nonsense_type"));
        assert!(!catalog.has_column_type("datetime"));
        assert_eq!(catalog.column_type_count(), COLUMN_TYPES.len());
    }

    #[test]
    fn test_builtin_modifiers_and_indexes() {
        let catalog = Catalog::builtin();
        for name in ["unsigned", "nullable", "default", "after", "comment"] {
            assert!(catalog.has_modifier_or_index(name), "missing {}", name);
        }
        for name in INDEX_KEYWORDS {
            assert!(catalog.has_modifier_or_index(name));
        }
        assert!(catalog.has_modifier_or_index("useCurrent"));
        assert!(!catalog.has_modifier_or_index("sparkly"));
    }

    #[test]
    fn test_extra_names() {
        let catalog = Catalog::builtin()
            .with_extra_column_types(["citext"])
            .with_extra_modifiers(["Invisible"]);
        assert!(catalog.has_column_type("citext"));
        assert!(catalog.has_modifier_or_index("invisible"));
        assert_eq!(catalog.column_type_count(), COLUMN_TYPES.len() + 1);
    }

    #[test]
    fn test_tables_are_unique_and_lowercase() {
        let types: BTreeSet<_> = COLUMN_TYPES.iter().collect();
        assert_eq!(types.len(), COLUMN_TYPES.len());
        let modifiers: BTreeSet<_> = COLUMN_MODIFIERS.iter().collect();
        assert_eq!(modifiers.len(), COLUMN_MODIFIERS.len());
        assert!(
            COLUMN_MODIFIERS
                .iter()
                .all(|m| m.chars().all(|c| !c.is_uppercase()))
        );
    }
}
