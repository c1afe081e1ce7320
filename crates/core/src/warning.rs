//! Non-fatal diagnostics
//!
//! Anomalies that do not stop the pipeline (blank comments, empty enum or
//! column lists, unknown formats) are collected here and mirrored to the
//! `tracing` log as they are recorded. The SQL artifact is still produced
//! using the documented fallback.

use serde::Serialize;

/// Kind of a recorded warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Comment rendered with blank content
    BlankComment,
    /// Enum type rendered without any value
    EmptyEnum,
    /// Table rendered without any column
    EmptyColumns,
    /// Numeric schema with a format no SQL type is known for
    UnknownNumericFormat,
    /// Structural column policy named a column that does not exist
    UnknownStructuralColumn,
    /// Entity declares no properties
    EmptyEntity,
    /// Entity or property name is not a plain SQL identifier
    UnquotedIdentifier,
}

/// A single non-fatal diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    /// Warning kind for programmatic handling
    pub kind: WarningKind,

    /// Object the warning is about (e.g. `api.user.status`)
    pub target: String,

    /// Human-readable message
    pub message: String,
}

impl Warning {
    /// Create a new warning
    pub fn new(kind: WarningKind, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.target, self.message)
    }
}

/// Ordered collection of warnings for one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Warnings {
    items: Vec<Warning>,
}

impl Warnings {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning and log it
    pub fn push(&mut self, warning: Warning) {
        tracing::warn!(kind = ?warning.kind, object = %warning.target, "{}", warning.message);
        self.items.push(warning);
    }

    /// Shorthand for `push(Warning::new(..))`
    pub fn warn(&mut self, kind: WarningKind, target: impl Into<String>, message: impl Into<String>) {
        self.push(Warning::new(kind, target, message));
    }

    /// Move all warnings of another collection into this one
    pub fn extend(&mut self, other: Warnings) {
        self.items.extend(other.items);
    }

    /// Check whether any warning of the given kind was recorded
    pub fn contains(&self, kind: WarningKind) -> bool {
        self.items.iter().any(|w| w.kind == kind)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Warning> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<Warning> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Warnings {
    type Item = &'a Warning;
    type IntoIter = std::slice::Iter<'a, Warning>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
