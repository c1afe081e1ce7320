//! Structural column policies
//!
//! The id, timestamp, operator and soft-delete columns are synthesized from a
//! policy rather than declared in the model. A policy is written in the
//! configuration (or in an entity's `additionalProperties`) as a boolean, a
//! tag string, a column definition or a list of column definitions.

use crate::metas::Column;
use serde::de::value::MapAccessDeserializer;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How one kind of structural column is generated
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColumnPolicy {
    /// No column
    Disabled,
    /// The built-in column(s)
    #[default]
    Enabled,
    /// A tag selecting a variant of the built-in column(s)
    Named(String),
    /// One user-defined column
    Custom(Column),
    /// Several user-defined columns
    CustomList(Vec<Column>),
}

impl ColumnPolicy {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, ColumnPolicy::Disabled)
    }

    pub fn named(tag: impl Into<String>) -> Self {
        ColumnPolicy::Named(tag.into())
    }
}

impl From<bool> for ColumnPolicy {
    fn from(enabled: bool) -> Self {
        if enabled {
            ColumnPolicy::Enabled
        } else {
            ColumnPolicy::Disabled
        }
    }
}

/// Wire shape of a policy
#[derive(Deserialize, Serialize)]
#[serde(untagged)]
enum RawPolicy {
    Flag(bool),
    Name(String),
    Column(ColumnMap),
    Columns(Vec<ColumnMap>),
}

/// A column written as a map. Derived `Column` also accepts a sequence,
/// which would let a list of strings pass as one column.
#[derive(Serialize)]
#[serde(transparent)]
struct ColumnMap(Column);

impl<'de> Deserialize<'de> for ColumnMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MapVisitor;

        impl<'de> Visitor<'de> for MapVisitor {
            type Value = ColumnMap;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a column definition map")
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
                Column::deserialize(MapAccessDeserializer::new(map)).map(ColumnMap)
            }
        }

        deserializer.deserialize_map(MapVisitor)
    }
}

impl From<RawPolicy> for ColumnPolicy {
    fn from(raw: RawPolicy) -> Self {
        match raw {
            RawPolicy::Flag(flag) => flag.into(),
            RawPolicy::Name(name) => ColumnPolicy::Named(name),
            RawPolicy::Column(ColumnMap(column)) => ColumnPolicy::Custom(column),
            RawPolicy::Columns(columns) => {
                ColumnPolicy::CustomList(columns.into_iter().map(|c| c.0).collect())
            }
        }
    }
}

impl<'de> Deserialize<'de> for ColumnPolicy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawPolicy::deserialize(deserializer).map(Into::into)
    }
}

impl Serialize for ColumnPolicy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = match self {
            ColumnPolicy::Disabled => RawPolicy::Flag(false),
            ColumnPolicy::Enabled => RawPolicy::Flag(true),
            ColumnPolicy::Named(name) => RawPolicy::Name(name.clone()),
            ColumnPolicy::Custom(column) => RawPolicy::Column(ColumnMap(column.clone())),
            ColumnPolicy::CustomList(columns) => {
                RawPolicy::Columns(columns.iter().cloned().map(ColumnMap).collect())
            }
        };
        raw.serialize(serializer)
    }
}
