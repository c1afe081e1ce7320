//! Schema nodes of the input model
//!
//! The input is JSON-Schema flavored. Each node is classified once, while
//! deserializing, into a closed set of kinds so that later stages match on
//! [`NodeKind`] instead of probing string tags:
//!
//! ```text
//! "$ref" present        → Reference
//! type == "array"       → Array
//! "enum" present        → Enum
//! type == "object"      → Object
//! anything else         → Scalar
//! ```

use crate::policy::ColumnPolicy;
use indexmap::IndexMap;
use migrator_core::Literal;
use serde::{Deserialize, Serialize};
use serde_json::Number;

// ============================================================================
// SchemaNode
// ============================================================================

/// One node of the model tree (an entity, a property, or array items)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawNode")]
pub struct SchemaNode {
    /// Classified shape of the node
    pub kind: NodeKind,

    /// Declared `type`, verbatim
    pub ty: Option<String>,

    /// Free text, becomes a `COMMENT ON`
    pub description: Option<String>,

    /// Column default expression
    pub default: Option<Literal>,

    pub nullable: Option<bool>,

    pub unique: Option<bool>,

    /// Validation facets used for CHECK synthesis
    pub facets: Facets,
}

/// Closed set of node shapes
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// An entity (or a nested object property)
    Object {
        properties: IndexMap<String, SchemaNode>,
        overrides: TableOverrides,
    },
    /// A list; `items` is optional here and required by the type mapper
    Array { items: Option<Box<SchemaNode>> },
    /// A value restricted to the listed members
    Enum { values: Vec<Literal> },
    /// A plain value (`string`, `integer`, `boolean`, custom types, ...)
    Scalar { format: Option<String> },
    /// A belongs-to reference to another entity
    Reference { target: String },
}

impl SchemaNode {
    /// Declared type, or `""` when the node has none
    pub fn type_name(&self) -> &str {
        self.ty.as_deref().unwrap_or_default()
    }

    /// Whether the declared type is `number` or `integer`
    pub fn is_numeric(&self) -> bool {
        matches!(self.type_name(), "number" | "integer")
    }

    pub fn is_string(&self) -> bool {
        self.type_name() == "string"
    }

    pub fn is_object(&self) -> bool {
        matches!(self.kind, NodeKind::Object { .. })
    }

    pub fn is_reference(&self) -> bool {
        matches!(self.kind, NodeKind::Reference { .. })
    }

    /// What the node was classified as, for error messages
    pub fn shape(&self) -> String {
        match &self.kind {
            NodeKind::Object { .. } => "object".to_string(),
            NodeKind::Array { .. } => "array".to_string(),
            NodeKind::Enum { .. } => match self.ty.as_deref() {
                Some(ty) => format!("enum of {}", ty),
                None => "enum".to_string(),
            },
            NodeKind::Reference { .. } => "$ref".to_string(),
            NodeKind::Scalar { .. } => self.ty.clone().unwrap_or_else(|| "none".to_string()),
        }
    }

    /// `format` of a scalar node
    pub fn format(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Scalar { format } => format.as_deref(),
            _ => None,
        }
    }

    /// Properties of an object node, in declaration order
    pub fn properties(&self) -> Option<&IndexMap<String, SchemaNode>> {
        match &self.kind {
            NodeKind::Object { properties, .. } => Some(properties),
            _ => None,
        }
    }

    /// Per-entity overrides of an object node
    pub fn overrides(&self) -> Option<&TableOverrides> {
        match &self.kind {
            NodeKind::Object { overrides, .. } => Some(overrides),
            _ => None,
        }
    }

    /// Members of an enum node
    pub fn enum_values(&self) -> Option<&[Literal]> {
        match &self.kind {
            NodeKind::Enum { values } => Some(values),
            _ => None,
        }
    }

    /// Non-blank description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.trim().is_empty())
    }
}

// ============================================================================
// Facets
// ============================================================================

/// Validation facets of a node
///
/// The draft-6 numeric form of `exclusiveMinimum` / `exclusiveMaximum` is
/// folded into the bound plus the exclusive flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Facets {
    pub minimum: Option<Number>,
    pub maximum: Option<Number>,
    pub exclusive_minimum: bool,
    pub exclusive_maximum: bool,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub pattern: Option<String>,
}

impl Facets {
    /// No facet is set
    pub fn is_empty(&self) -> bool {
        self == &Facets::default()
    }
}

// ============================================================================
// TableOverrides
// ============================================================================

/// Per-entity settings read from `additionalProperties`
///
/// Any structural policy set here wins over the global one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ColumnPolicy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<ColumnPolicy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<ColumnPolicy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub soft_delete: Option<ColumnPolicy>,

    /// Applied to every declared column of the entity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<bool>,

    /// SQL type forced on every declared column of the entity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,

    /// CHECK expression applied to every declared column of the entity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check: Option<String>,
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum Exclusive {
    Flag(bool),
    Bound(Number),
}

/// `additionalProperties` is either a boolean (plain JSON Schema) or the
/// override bag
#[derive(Deserialize)]
#[serde(untagged)]
enum RawOverrides {
    Flag(bool),
    Bag(TableOverrides),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    #[serde(rename = "type")]
    ty: Option<String>,
    properties: Option<IndexMap<String, SchemaNode>>,
    items: Option<Box<SchemaNode>>,
    #[serde(rename = "$ref")]
    reference: Option<String>,
    #[serde(rename = "enum")]
    members: Option<Vec<Literal>>,
    minimum: Option<Number>,
    maximum: Option<Number>,
    exclusive_minimum: Option<Exclusive>,
    exclusive_maximum: Option<Exclusive>,
    min_length: Option<u64>,
    max_length: Option<u64>,
    pattern: Option<String>,
    format: Option<String>,
    description: Option<String>,
    default: Option<Literal>,
    nullable: Option<bool>,
    unique: Option<bool>,
    additional_properties: Option<RawOverrides>,
}

fn fold_exclusive(bound: Option<Number>, exclusive: Option<Exclusive>) -> (Option<Number>, bool) {
    match exclusive {
        Some(Exclusive::Flag(flag)) => (bound, flag),
        Some(Exclusive::Bound(n)) => (Some(n), true),
        None => (bound, false),
    }
}

impl From<RawNode> for SchemaNode {
    fn from(raw: RawNode) -> Self {
        let (minimum, exclusive_minimum) = fold_exclusive(raw.minimum, raw.exclusive_minimum);
        let (maximum, exclusive_maximum) = fold_exclusive(raw.maximum, raw.exclusive_maximum);

        let facets = Facets {
            minimum,
            maximum,
            exclusive_minimum,
            exclusive_maximum,
            min_length: raw.min_length,
            max_length: raw.max_length,
            pattern: raw.pattern,
        };

        let kind = if let Some(target) = raw.reference {
            NodeKind::Reference { target }
        } else if raw.ty.as_deref() == Some("array") {
            NodeKind::Array { items: raw.items }
        } else if let Some(values) = raw.members {
            NodeKind::Enum { values }
        } else if raw.ty.as_deref() == Some("object") {
            let overrides = match raw.additional_properties {
                Some(RawOverrides::Bag(bag)) => bag,
                Some(RawOverrides::Flag(allowed)) => {
                    tracing::trace!(allowed, "boolean additionalProperties carries no overrides");
                    TableOverrides::default()
                }
                None => TableOverrides::default(),
            };
            NodeKind::Object {
                properties: raw.properties.unwrap_or_default(),
                overrides,
            }
        } else {
            NodeKind::Scalar { format: raw.format }
        };

        SchemaNode {
            kind,
            ty: raw.ty,
            description: raw.description,
            default: raw.default,
            nullable: raw.nullable,
            unique: raw.unique,
            facets,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: serde_json::Value) -> SchemaNode {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_reference_wins_over_type() {
        let n = node(json!({ "type": "integer", "$ref": "user" }));
        assert_eq!(
            n.kind,
            NodeKind::Reference {
                target: "user".to_string()
            }
        );
        assert_eq!(n.type_name(), "integer");
    }

    #[test]
    fn test_shape_names_classification() {
        assert_eq!(node(json!({ "type": "object" })).shape(), "object");
        assert_eq!(node(json!({ "type": "string", "enum": ["a"] })).shape(), "enum of string");
        assert_eq!(node(json!({ "type": "object", "$ref": "x" })).shape(), "$ref");
        assert_eq!(node(json!({ "type": "integer" })).shape(), "integer");
        assert_eq!(node(json!({})).shape(), "none");
    }

    #[test]
    fn test_array_keeps_missing_items() {
        let n = node(json!({ "type": "array" }));
        assert_eq!(n.kind, NodeKind::Array { items: None });

        let n = node(json!({ "type": "array", "items": { "$ref": "tag" } }));
        match n.kind {
            NodeKind::Array { items: Some(items) } => assert!(items.is_reference()),
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_enum_classification() {
        let n = node(json!({ "type": "string", "enum": ["a", "b", 3] }));
        assert_eq!(n.enum_values().unwrap().len(), 3);
        assert!(n.is_string());
    }

    #[test]
    fn test_object_keeps_property_order() {
        let n = node(json!({
            "type": "object",
            "properties": {
                "zeta": { "type": "string" },
                "alpha": { "type": "integer" },
                "mid": { "type": "boolean" }
            }
        }));

        let names: Vec<_> = n.properties().unwrap().keys().cloned().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_object_overrides() {
        let n = node(json!({
            "type": "object",
            "additionalProperties": {
                "id": "uuid",
                "softDelete": false,
                "dataType": "text",
                "check": "char_length(name) > 0"
            }
        }));

        let overrides = n.overrides().unwrap();
        assert_eq!(overrides.id, Some(ColumnPolicy::named("uuid")));
        assert_eq!(overrides.soft_delete, Some(ColumnPolicy::Disabled));
        assert_eq!(overrides.timestamp, None);
        assert_eq!(overrides.data_type.as_deref(), Some("text"));
    }

    #[test]
    fn test_boolean_additional_properties_means_no_overrides() {
        let n = node(json!({ "type": "object", "additionalProperties": false }));
        assert_eq!(n.overrides(), Some(&TableOverrides::default()));
    }

    #[test]
    fn test_exclusive_forms() {
        let draft4 = node(json!({ "type": "integer", "minimum": 1, "exclusiveMinimum": true }));
        assert_eq!(draft4.facets.minimum, Some(Number::from(1)));
        assert!(draft4.facets.exclusive_minimum);

        let draft6 = node(json!({ "type": "integer", "exclusiveMaximum": 10 }));
        assert_eq!(draft6.facets.maximum, Some(Number::from(10)));
        assert!(draft6.facets.exclusive_maximum);

        let inclusive = node(json!({ "type": "integer", "maximum": 10 }));
        assert!(!inclusive.facets.exclusive_maximum);
    }

    #[test]
    fn test_scalar_format_and_blank_description() {
        let n = node(json!({ "type": "string", "format": "uuid", "description": "  " }));
        assert_eq!(n.format(), Some("uuid"));
        assert_eq!(n.description(), None);
        assert!(n.facets.is_empty());
    }
}
