//! Error types for pg-migrator
//!
//! This module provides unified error handling across the whole migration
//! pipeline: model validation, type mapping, rendering, model loading,
//! connection resolution and execution.

use std::path::PathBuf;
use thiserror::Error;

/// Column attribute that must be present before a column can be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnField {
    Name,
    Type,
}

impl std::fmt::Display for ColumnField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnField::Name => write!(f, "name"),
            ColumnField::Type => write!(f, "type"),
        }
    }
}

fn column_suffix(column: &Option<String>) -> String {
    match column {
        Some(name) => format!(" (column '{}')", name),
        None => String::new(),
    }
}

/// The main error type for pg-migrator
#[derive(Debug, Error)]
pub enum MigrateError {
    // ========================================================================
    // Model Errors
    // ========================================================================
    /// A top-level entity is not object-typed
    #[error("Schema type of entity '{entity}' must be \"object\", but got {found}")]
    ModelType { entity: String, found: String },

    /// Array schema without an `items` schema
    #[error("Array type of column '{column}' requires the \"items\" property, but got none")]
    MissingItems { column: String },

    /// `enum` declared on a type that cannot back a PostgreSQL enum
    #[error("Enum on column '{column}' requires an integer, number or string type, but got {found}")]
    InvalidEnumBaseType { column: String, found: String },

    // ========================================================================
    // Render Errors
    // ========================================================================
    /// Column reached the renderer without a name or a type
    #[error("Column {field} was required, but got none{}", column_suffix(.column))]
    MissingColumnField {
        field: ColumnField,
        column: Option<String>,
    },

    // ========================================================================
    // Connection Errors
    // ========================================================================
    /// Connect string does not use the `postgresql:` protocol
    #[error("The protocol must be \"postgresql:\", but got {0}")]
    ConnectProtocol(String),

    /// Connect string could not be parsed
    #[error("Invalid connect string '{input}': {message}")]
    InvalidConnectString { input: String, message: String },

    /// No connection was resolved before execution
    #[error("Unresolved connection: no connection available to execute the migration")]
    UnresolvedConnection,

    /// Opening the database connection failed
    #[error("Database connect failed: {0}")]
    Connect(String),

    /// The migration script was rejected by the database
    #[error("Migration exec failed: {0}")]
    Execution(String),

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Model file with an extension no loader handles
    #[error("Unknown file type: {0}")]
    UnsupportedFileType(String),

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON parse error
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parse error
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl MigrateError {
    /// Create a model type error
    pub fn model_type(entity: impl Into<String>, found: impl Into<String>) -> Self {
        MigrateError::ModelType {
            entity: entity.into(),
            found: found.into(),
        }
    }

    /// Create a missing items error
    pub fn missing_items(column: impl Into<String>) -> Self {
        MigrateError::MissingItems {
            column: column.into(),
        }
    }

    /// Create an invalid enum base type error
    pub fn invalid_enum_base(column: impl Into<String>, found: impl Into<String>) -> Self {
        MigrateError::InvalidEnumBaseType {
            column: column.into(),
            found: found.into(),
        }
    }

    /// Create a missing column field error
    pub fn missing_column_field(field: ColumnField, column: Option<&str>) -> Self {
        MigrateError::MissingColumnField {
            field,
            column: column.filter(|c| !c.is_empty()).map(str::to_string),
        }
    }

    /// Create an invalid configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        MigrateError::InvalidConfig(msg.into())
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        MigrateError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Check if this error comes from the model or its translation
    pub fn is_model_error(&self) -> bool {
        matches!(
            self,
            MigrateError::ModelType { .. }
                | MigrateError::MissingItems { .. }
                | MigrateError::InvalidEnumBaseType { .. }
                | MigrateError::MissingColumnField { .. }
        )
    }

    /// Check if this error comes from resolving or using a connection
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            MigrateError::ConnectProtocol(_)
                | MigrateError::InvalidConnectString { .. }
                | MigrateError::UnresolvedConnection
                | MigrateError::Connect(_)
                | MigrateError::Execution(_)
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            MigrateError::Io(_) | MigrateError::FileRead { .. } | MigrateError::FileWrite { .. }
        )
    }
}

/// Result type alias using MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> MigrateResult<T>;
}

impl<T, E: Into<MigrateError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> MigrateResult<T> {
        self.map_err(|e| {
            let err: MigrateError = e.into();
            MigrateError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
