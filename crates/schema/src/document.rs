//! Loading of JSON schema documents
//!
//! A schema document maps table names to field maps, and each field map maps
//! a field name to a colon-delimited field spec:
//!
//! ```json
//! {
//!   "users": { "name": "string", "email": "string:unique" },
//!   "posts_tags_pivot": {}
//! }
//! ```
//!
//! Table and field order follow the file.

use migjson_core::{EngineError, EngineResult};
use serde_json::{Map, Value};
use std::path::Path;

// ============================================================================
// Document Types
// ============================================================================

/// A single `"field": "spec"` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    /// Column name
    pub name: String,

    /// Raw field spec, e.g. `string(50):nullable:unique`
    pub spec: String,
}

/// A table and its fields, in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    /// Table name as written in the file
    pub name: String,

    /// Field definitions
    pub fields: Vec<FieldDefinition>,
}

impl TableDefinition {
    /// Create an empty table definition
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field (builder style)
    pub fn with_field(mut self, name: impl Into<String>, spec: impl Into<String>) -> Self {
        self.fields.push(FieldDefinition {
            name: name.into(),
            spec: spec.into(),
        });
        self
    }

    /// Look up a field spec by field name
    pub fn field_spec(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == field)
            .map(|f| f.spec.as_str())
    }

    /// Check if the table has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Parsed schema file. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDocument {
    tables: Vec<TableDefinition>,
}

impl SchemaDocument {
    /// Create a document from table definitions
    pub fn new(tables: Vec<TableDefinition>) -> Self {
        Self { tables }
    }

    /// All tables in file order
    pub fn tables(&self) -> &[TableDefinition] {
        &self.tables
    }

    /// Look up a table by its raw name
    pub fn table(&self, name: &str) -> Option<&TableDefinition> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if the document has no tables
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// The `{table: {field: spec}}` fragment for one field, used to echo the
    /// offending section back in validation reports
    pub fn section(&self, table: &str, field: &str) -> Value {
        let spec = self
            .table(table)
            .and_then(|t| t.field_spec(field))
            .map(|s| Value::String(s.to_string()))
            .unwrap_or(Value::Null);

        let mut fields = Map::new();
        fields.insert(field.to_string(), spec);
        let mut section = Map::new();
        section.insert(table.to_string(), Value::Object(fields));
        Value::Object(section)
    }
}

// ============================================================================
// Load Functions
// ============================================================================

/// Load a schema document from a JSON file
///
/// # Errors
///
/// - `FileNotFound` if the path does not exist
/// - `FileRead` if it cannot be read
/// - `InvalidJson` if the contents are not JSON
/// - `InvalidDocument` if the JSON is not shaped like a schema document
pub fn load_document(path: impl AsRef<Path>) -> EngineResult<SchemaDocument> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => EngineError::FileNotFound(path.to_path_buf()),
        _ => EngineError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        },
    })?;

    let document = parse_document(&json).map_err(|e| match e {
        EngineError::Json(je) => EngineError::InvalidJson {
            path: path.to_path_buf(),
            message: je.to_string(),
        },
        other => other,
    })?;

    tracing::debug!(
        "Loaded {} table(s) from {}",
        document.len(),
        path.display()
    );
    Ok(document)
}

/// Parse a schema document from a JSON string
pub fn parse_document(json: &str) -> EngineResult<SchemaDocument> {
    let value: Value = serde_json::from_str(json)?;

    let root = match value {
        Value::Object(map) => map,
        Value::Array(items) if items.is_empty() => Map::new(),
        _ => {
            return Err(EngineError::invalid_document(
                "top-level value must be an object mapping table names to fields",
            ));
        }
    };

    let tables = root
        .into_iter()
        .map(|(name, fields)| parse_table(name, fields))
        .collect::<EngineResult<Vec<_>>>()?;

    Ok(SchemaDocument::new(tables))
}

fn parse_table(name: String, fields: Value) -> EngineResult<TableDefinition> {
    let fields = match fields {
        Value::Object(map) => map,
        // Pivot tables are often written as `null` or `[]`
        Value::Null => Map::new(),
        Value::Array(items) if items.is_empty() => Map::new(),
        _ => {
            return Err(EngineError::invalid_document(format!(
                "table '{}' must map to an object of field specs",
                name
            )));
        }
    };

    let mut table = TableDefinition::new(name);
    for (field, spec) in fields {
        match spec {
            Value::String(spec) => table.fields.push(FieldDefinition { name: field, spec }),
            _ => {
                return Err(EngineError::invalid_document(format!(
                    "field '{}.{}' must be a string spec",
                    table.name, field
                )));
            }
        }
    }

    Ok(table)
}

// ============================================================================
// Tests
// ============================================================================
