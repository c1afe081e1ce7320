//! The input model: entity name → schema node, in document order

use crate::schema::SchemaNode;
use crate::validation::Validator;
use indexmap::IndexMap;
use migrator_core::{MigrateResult, Validatable};
use serde::Deserialize;

/// Parsed model handed to the pipeline
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Model {
    entities: IndexMap<String, SchemaNode>,
}

impl Model {
    pub fn new(entities: IndexMap<String, SchemaNode>) -> Self {
        Self { entities }
    }

    /// Entities in document order
    pub fn entities(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.entities.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.entities.get(name)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl FromIterator<(String, SchemaNode)> for Model {
    fn from_iter<I: IntoIterator<Item = (String, SchemaNode)>>(iter: I) -> Self {
        Self {
            entities: iter.into_iter().collect(),
        }
    }
}

impl Validatable for Model {
    /// Only the fatal check; lints are left to [`Validator::lints`]
    fn validate(&self) -> MigrateResult<()> {
        Validator::fatal().validate_result(self)
    }
}
