//! Core value types shared by the model and the IR

use serde::{Deserialize, Serialize};

// ============================================================================
// Literal
// ============================================================================

/// A scalar literal as written in the model: column defaults and enum members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    /// `true` / `false`
    Bool(bool),
    /// Integer or decimal number, kept in its textual form
    Number(serde_json::Number),
    /// Free text
    String(String),
}

impl Literal {
    /// Render as a SQL value: strings single-quoted with `'` doubled,
    /// numbers and booleans bare
    pub fn to_sql_literal(&self) -> String {
        match self {
            Literal::String(s) => quote_sql_string(s),
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Number(n) => write!(f, "{}", n),
            Literal::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Number(value.into())
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

/// Wrap text in single quotes, doubling embedded quotes
pub fn quote_sql_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
