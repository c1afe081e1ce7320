//! # Metas Generator
//!
//! Walks the model and builds the IR consumed by the renderer.
//!
//! ## Pipeline
//!
//! ```text
//! Model + GeneratorConfig
//!         │
//!         ▼
//!   for each entity (document order)
//!         ├──► table comment
//!         ├──► id column
//!         ├──► declared columns ──► map_type / enum types / column comments
//!         ├──► timestamp, operator, soft-delete columns
//!         ▼
//!   Metas { tables, types, comments }
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use migrator_codegen::{Generator, GeneratorConfig};
//!
//! let mut warnings = Warnings::new();
//! let metas = Generator::new(GeneratorConfig::default()).generate(&model, &mut warnings)?;
//! println!("Generated {} tables", metas.tables.len());
//! ```

use crate::GeneratorConfig;
use crate::constraints::synthesize_check;
use crate::context::TableContext;
use crate::structural;
use crate::type_mapper::map_type;
use migrator_core::{Literal, MigrateError, MigrateResult, Warnings};
use migrator_ir::{Column, Comment, EnumType, Metas, Model, NodeKind, SchemaNode, Table};

// ============================================================================
// Generator
// ============================================================================

/// Builds [`Metas`] from a model.
///
/// Stateless aside from its configuration; one generator can serve many
/// models.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    // ====================================================================
    // Construction
    // ====================================================================

    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    // ====================================================================
    // Generation
    // ====================================================================

    /// Generate tables, enum types and comments for every entity.
    ///
    /// # Errors
    ///
    /// - `ModelType` when an entity is not an object; the run halts there
    /// - any type mapping error of a declared column
    pub fn generate(&self, model: &Model, warnings: &mut Warnings) -> MigrateResult<Metas> {
        let mut metas = Metas::new();

        for (name, node) in model.entities() {
            self.generate_entity(name, node, &mut metas, warnings)?;
        }

        tracing::info!(
            schema = %self.config.schema,
            tables = metas.tables.len(),
            types = metas.types.len(),
            comments = metas.comments.len(),
            "metas generated",
        );

        Ok(metas)
    }

    fn generate_entity(
        &self,
        name: &str,
        node: &SchemaNode,
        metas: &mut Metas,
        warnings: &mut Warnings,
    ) -> MigrateResult<()> {
        let NodeKind::Object {
            properties,
            overrides,
        } = &node.kind
        else {
            return Err(MigrateError::model_type(name, node.shape()));
        };

        let table = TableContext::new(&self.config.schema, name);
        let table_name = table.qualified_name();

        if let Some(description) = node.description() {
            metas
                .comments
                .push(Comment::table(table_name.clone(), description));
        }

        let config = &self.config;
        let id = overrides.id.as_ref().unwrap_or(&config.id);
        let timestamp = overrides.timestamp.as_ref().unwrap_or(&config.timestamp);
        let operator = overrides.operator.as_ref().unwrap_or(&config.operator);
        let soft_delete = overrides.soft_delete.as_ref().unwrap_or(&config.soft_delete);

        let mut columns = structural::id_columns(id);

        for (column_name, property) in properties {
            let ctx = table.column(column_name);

            let ty = match &overrides.data_type {
                Some(data_type) => data_type.clone(),
                None => map_type(property, &ctx, warnings)?,
            };

            if let Some(values) = enum_members(property) {
                metas
                    .types
                    .push(EnumType::new(ctx.enum_type_name(), values.to_vec()));
            }

            if let Some(description) = property.description() {
                metas
                    .comments
                    .push(Comment::column(ctx.qualified_name(), description));
            }

            let check = overrides.check.clone().or_else(|| {
                if config.checks {
                    synthesize_check(column_name, property).map(|expr| format!("({})", expr))
                } else {
                    None
                }
            });

            columns.push(Column {
                name: column_name.clone(),
                ty,
                primary_key: overrides.primary_key,
                nullable: property.nullable,
                unique: property.unique,
                default: property.default.clone(),
                check,
            });
        }

        columns.extend(structural::timestamp_columns(timestamp, &table, warnings));
        columns.extend(structural::operator_columns(operator, &table, warnings));
        columns.extend(structural::soft_delete_columns(soft_delete));

        tracing::debug!(table = %table_name, columns = columns.len(), "table generated");
        metas.tables.push(Table::new(table_name, columns));

        Ok(())
    }
}

/// Enum members of a column, looking through array items
fn enum_members(node: &SchemaNode) -> Option<&[Literal]> {
    match &node.kind {
        NodeKind::Enum { values } => Some(values),
        NodeKind::Array { items: Some(items) } => enum_members(items),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
