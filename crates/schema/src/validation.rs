//! Field-spec validation
//!
//! Each field spec is split on `:`. The first token must be a column type of
//! the schema builder; every following token must be a column modifier or an
//! index keyword. Parameters in parentheses are ignored, so `string(50)` and
//! `default('guest')` validate as `string` and `default`.
//!
//! Problems are collected per table and field instead of stopping at the
//! first one. A field holds at most one message per [`ErrorKind`]; when a
//! field has several bad modifiers, the last one is reported.

use crate::document::{SchemaDocument, TableDefinition};
use migjson_core::Catalog;

// ============================================================================
// Token Checks
// ============================================================================

/// Strip a `(...)` parameter suffix and surrounding whitespace from a token.
///
/// `"string(50)"` becomes `"string"`, `" string "` becomes `"string"`.
pub fn normalize_type(raw: &str) -> &str {
    let head = match raw.find('(') {
        Some(pos) => &raw[..pos],
        None => raw,
    };
    head.trim()
}

/// Check a column type token against the catalog
pub fn is_known_column_type(catalog: &Catalog, column_type: &str) -> bool {
    catalog.has_column_type(normalize_type(column_type))
}

/// Check a modifier or index token against the catalog
pub fn is_known_modifier_or_index(catalog: &Catalog, token: &str) -> bool {
    catalog.has_modifier_or_index(normalize_type(token))
}

// ============================================================================
// Error Report
// ============================================================================

/// Kind of field-spec problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The first token is not a column type
    ColumnType,
    /// A later token is neither a modifier nor an index keyword
    ColumnModifier,
}

impl ErrorKind {
    /// Key used when reporting the error
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ColumnType => "columnType",
            ErrorKind::ColumnModifier => "columnModifier",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Problems found in one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors {
    /// Field name
    pub field: String,

    /// Column type problem, if any
    pub column_type: Option<String>,

    /// Modifier/index problem, if any
    pub column_modifier: Option<String>,
}

impl FieldErrors {
    fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            column_type: None,
            column_modifier: None,
        }
    }

    /// Message for one kind of problem
    pub fn get(&self, kind: ErrorKind) -> Option<&str> {
        match kind {
            ErrorKind::ColumnType => self.column_type.as_deref(),
            ErrorKind::ColumnModifier => self.column_modifier.as_deref(),
        }
    }

    /// All messages of this field, column type first
    pub fn messages(&self) -> impl Iterator<Item = (ErrorKind, &str)> {
        [ErrorKind::ColumnType, ErrorKind::ColumnModifier]
            .into_iter()
            .filter_map(move |kind| self.get(kind).map(|msg| (kind, msg)))
    }

    fn is_empty(&self) -> bool {
        self.column_type.is_none() && self.column_modifier.is_none()
    }
}

/// Problems found in one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableErrors {
    /// Raw table name
    pub table: String,

    /// Fields with at least one problem, in document order
    pub fields: Vec<FieldErrors>,
}

/// Validation result: table → field → kind → message, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    tables: Vec<TableErrors>,
}

impl ValidationReport {
    /// Tables with at least one problem
    pub fn tables(&self) -> &[TableErrors] {
        &self.tables
    }

    /// Look up one message
    pub fn get(&self, table: &str, field: &str, kind: ErrorKind) -> Option<&str> {
        self.tables
            .iter()
            .find(|t| t.table == table)?
            .fields
            .iter()
            .find(|f| f.field == field)?
            .get(kind)
    }

    /// Check if no problems were found
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Total number of messages
    pub fn error_count(&self) -> usize {
        self.tables
            .iter()
            .flat_map(|t| &t.fields)
            .map(|f| f.messages().count())
            .sum()
    }
}

// ============================================================================
// Validator
// ============================================================================

/// Validates schema documents against a [`Catalog`]
#[derive(Debug, Clone, Default)]
pub struct SchemaValidator {
    catalog: Catalog,
}

impl SchemaValidator {
    /// Create a validator with a custom catalog
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Validate every field of every table
    pub fn validate(&self, document: &SchemaDocument) -> ValidationReport {
        let tables = document
            .tables()
            .iter()
            .filter(|table| !table.is_empty())
            .filter_map(|table| self.validate_table(table))
            .collect();

        ValidationReport { tables }
    }

    fn validate_table(&self, table: &TableDefinition) -> Option<TableErrors> {
        let mut fields = Vec::new();

        for field in &table.fields {
            let mut errors = FieldErrors::new(&field.name);
            let mut tokens = field.spec.split(':');

            let column_type = normalize_type(tokens.next().unwrap_or_default());
            if !is_known_column_type(&self.catalog, column_type) {
                errors.column_type = Some(format!(
                    "'{}' is not a valid column type for field '{}' in table '{}'",
                    column_type, field.name, table.name
                ));
            }

            for token in tokens {
                if !is_known_modifier_or_index(&self.catalog, token) {
                    errors.column_modifier = Some(format!(
                        "'{}' is not a valid column modifier or index for field '{}' in table '{}'",
                        normalize_type(token),
                        field.name,
                        table.name
                    ));
                }
            }

            if !errors.is_empty() {
                tracing::debug!("Field '{}.{}' failed validation", table.name, field.name);
                fields.push(errors);
            }
        }

        if fields.is_empty() {
            None
        } else {
            Some(TableErrors {
                table: table.name.clone(),
                fields,
            })
        }
    }
}

/// Validate a document against the built-in catalog
pub fn validate(document: &SchemaDocument) -> ValidationReport {
    SchemaValidator::default().validate(document)
}

// ============================================================================
// Tests
// ============================================================================
