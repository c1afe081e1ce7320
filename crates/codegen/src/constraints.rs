//! # Constraint Synthesizer
//!
//! Builds a CHECK expression from the validation facets of a schema node.
//! Numeric nodes use `minimum` / `maximum`, string nodes use `minLength`,
//! `maxLength` and `pattern`. A facet set to zero still counts.

use migrator_core::quote_sql_string;
use migrator_ir::SchemaNode;

/// CHECK body for a column, or `None` when no facet applies
pub fn synthesize_check(column: &str, node: &SchemaNode) -> Option<String> {
    let facets = &node.facets;
    let mut conditions: Vec<String> = Vec::new();

    if node.is_numeric() {
        if let Some(min) = &facets.minimum {
            let symbol = if facets.exclusive_minimum { ">" } else { ">=" };
            conditions.push(format!("{} {} {}", column, symbol, min));
        }

        if let Some(max) = &facets.maximum {
            let symbol = if facets.exclusive_maximum { "<" } else { "<=" };
            conditions.push(format!("{} {} {}", column, symbol, max));
        }
    } else if node.is_string() {
        if let Some(min) = facets.min_length {
            conditions.push(format!("char_length({}) >= {}", column, min));
        }

        if let Some(max) = facets.max_length {
            conditions.push(format!("char_length({}) <= {}", column, max));
        }

        if let Some(pattern) = &facets.pattern {
            conditions.push(format!("{} ~* {}", quote_sql_string(pattern), column));
        }
    }

    if conditions.is_empty() {
        None
    } else {
        Some(conditions.join(" AND "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(value: serde_json::Value) -> Option<String> {
        let node: SchemaNode = serde_json::from_value(value).unwrap();
        synthesize_check("foo", &node)
    }

    #[test]
    fn test_numeric_bounds() {
        assert_eq!(
            check(json!({ "type": "integer", "minimum": 42 })).as_deref(),
            Some("foo >= 42")
        );
        assert_eq!(
            check(json!({
                "type": "integer",
                "minimum": 42,
                "exclusiveMinimum": true,
                "maximum": 88,
                "exclusiveMaximum": true
            }))
            .as_deref(),
            Some("foo > 42 AND foo < 88")
        );
        assert_eq!(
            check(json!({ "type": "number", "exclusiveMaximum": 1.5 })).as_deref(),
            Some("foo < 1.5")
        );
    }

    #[test]
    fn test_zero_counts_as_present() {
        assert_eq!(
            check(json!({ "type": "integer", "minimum": 0 })).as_deref(),
            Some("foo >= 0")
        );
        assert_eq!(
            check(json!({ "type": "string", "minLength": 0 })).as_deref(),
            Some("char_length(foo) >= 0")
        );
    }

    #[test]
    fn test_string_facets() {
        assert_eq!(
            check(json!({ "type": "string", "minLength": 42, "maxLength": 88 })).as_deref(),
            Some("char_length(foo) >= 42 AND char_length(foo) <= 88")
        );
        assert_eq!(
            check(json!({ "type": "string", "pattern": "^1\\d{10}$" })).as_deref(),
            Some("'^1\\d{10}$' ~* foo")
        );
        assert_eq!(
            check(json!({ "type": "string", "pattern": "it's" })).as_deref(),
            Some("'it''s' ~* foo")
        );
    }

    #[test]
    fn test_no_constraint() {
        assert_eq!(check(json!({ "type": "string" })), None);
        assert_eq!(check(json!({ "type": "boolean", "minimum": 1 })), None);
        assert_eq!(check(json!({ "type": "integer", "minLength": 3 })), None);
    }
}
