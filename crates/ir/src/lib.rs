//! # Migrator IR (Intermediate Representation)
//!
//! This crate holds both ends of the compilation: the input model as read
//! from JSON or YAML, and the table/type/comment IR handed to the renderer.
//!
//! ## Core Concepts
//!
//! - **Model**: Ordered map of entity name to [`SchemaNode`]
//! - **SchemaNode**: A JSON-Schema-like node classified into a [`NodeKind`]
//! - **ColumnPolicy**: How a structural column (id, timestamps, ...) is made
//! - **Metas**: Tables, enum types and comments, in output order
//!

// Module declarations
pub mod metas;
pub mod model;
pub mod policy;
pub mod schema;
pub mod serialization;
pub mod validation;

// Re-export commonly used types at crate root
pub use metas::{Column, Comment, CommentKind, EnumType, Metas, Table};
pub use model::Model;
pub use policy::ColumnPolicy;
pub use schema::{Facets, NodeKind, SchemaNode, TableOverrides};
pub use serialization::{ModelFormat, load_model, load_model_from_str};
pub use validation::{
    ValidationError, ValidationErrorCode, ValidationResult, ValidationRule, ValidationWarning,
    ValidationWarningCode, Validator, is_valid_identifier, validate,
};

// Re-export core types that are commonly used with IR
pub use migrator_core::{Literal, MigrateError, MigrateResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
