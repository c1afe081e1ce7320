//! Intermediate representation consumed by the renderer
//!
//! The generator builds one [`Metas`] bundle per run: tables with their
//! ordered columns, enum types and comments. Nothing here is mutated once
//! the generator returns it.

use migrator_core::{Literal, Named};
use serde::{Deserialize, Serialize};

// ============================================================================
// Column
// ============================================================================

/// A single table column
///
/// `name` and `ty` may deserialize empty (custom structural columns come from
/// user configuration); the renderer rejects such columns with
/// `MissingColumnField`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Column name
    #[serde(default)]
    pub name: String,

    /// SQL data type (lowercase, as produced by the type mapper)
    #[serde(rename = "type", default)]
    pub ty: String,

    /// Emit `PRIMARY KEY`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<bool>,

    /// `Some(false)` emits `NOT NULL`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    /// Emit `UNIQUE`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,

    /// Raw SQL default expression
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Literal>,

    /// CHECK expression body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check: Option<String>,
}

impl Column {
    /// Create a column with a name and a type and no constraints
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            ..Default::default()
        }
    }

    /// Mark as primary key
    pub fn primary_key(mut self) -> Self {
        self.primary_key = Some(true);
        self
    }

    /// Set nullability
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = Some(nullable);
        self
    }

    /// Mark as unique
    pub fn unique(mut self) -> Self {
        self.unique = Some(true);
        self
    }

    /// Set the default expression
    pub fn with_default(mut self, value: impl Into<Literal>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Set the CHECK expression
    pub fn with_check(mut self, check: impl Into<String>) -> Self {
        self.check = Some(check.into());
        self
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key == Some(true)
    }

    pub fn is_not_null(&self) -> bool {
        self.nullable == Some(false)
    }

    pub fn is_unique(&self) -> bool {
        self.unique == Some(true)
    }
}

impl Named for Column {
    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Table
// ============================================================================

/// A table with its columns in rendering order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Schema-qualified name (`<schema>.<entity>`)
    pub name: String,

    /// Columns: primary key, declared columns, then structural columns
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Find a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name_matches(name))
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

impl Named for Table {
    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// EnumType
// ============================================================================

/// A PostgreSQL enum type backing an `enum` column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumType {
    /// `<schema>.<entity>_<column>`
    pub name: String,

    /// Members in declaration order
    pub enums: Vec<Literal>,
}

impl EnumType {
    pub fn new(name: impl Into<String>, enums: Vec<Literal>) -> Self {
        Self {
            name: name.into(),
            enums,
        }
    }
}

impl Named for EnumType {
    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Comment
// ============================================================================

/// Object a comment is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentKind {
    Table,
    Column,
}

impl CommentKind {
    /// SQL keyword used in `COMMENT ON <keyword>`
    pub fn keyword(&self) -> &'static str {
        match self {
            CommentKind::Table => "TABLE",
            CommentKind::Column => "COLUMN",
        }
    }
}

impl std::fmt::Display for CommentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommentKind::Table => write!(f, "table"),
            CommentKind::Column => write!(f, "column"),
        }
    }
}

/// A `COMMENT ON` statement taken from a `description`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "type")]
    pub kind: CommentKind,

    /// `<schema>.<entity>` or `<schema>.<entity>.<column>`
    pub target: String,

    pub content: String,
}

impl Comment {
    pub fn table(target: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind: CommentKind::Table,
            target: target.into(),
            content: content.into(),
        }
    }

    pub fn column(target: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind: CommentKind::Column,
            target: target.into(),
            content: content.into(),
        }
    }
}

// ============================================================================
// Metas
// ============================================================================

/// Complete, order-preserving IR for one compilation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metas {
    pub tables: Vec<Table>,
    pub types: Vec<EnumType>,
    pub comments: Vec<Comment>,
}

impl Metas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a table by its qualified name
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name_matches(name))
    }

    /// Find an enum type by its qualified name
    pub fn enum_type(&self, name: &str) -> Option<&EnumType> {
        self.types.iter().find(|t| t.name_matches(name))
    }
}

// ============================================================================
// Tests
// ============================================================================
