//! # Migrator Codegen
//!
//! Compiles a validated model into PostgreSQL DDL.
//!
//! ## Features
//!
//! - **Type Mapping**: JSON-Schema types and formats to PostgreSQL types
//! - **Constraint Synthesis**: CHECK expressions from validation facets
//! - **Structural Columns**: id, timestamp, operator and soft-delete columns
//! - **Metas Generation**: tables, enum types and comments in model order
//! - **Rendering**: one transaction-wrapped, deterministic SQL script
//!

// ============================================================================
// Modules
// ============================================================================

pub mod constraints;
pub mod context;
pub mod generator;
pub mod render;
pub mod structural;
pub mod type_mapper;

// ============================================================================
// Re-exports
// ============================================================================

pub use constraints::synthesize_check;
pub use context::{ColumnContext, TableContext};
pub use generator::Generator;
pub use render::{render, render_column, render_comment, render_table, render_type};
pub use type_mapper::map_type;

use migrator_core::{MigrateResult, Validatable, Warnings};
use migrator_ir::{ColumnPolicy, Metas, Model, Validator};
use serde::{Deserialize, Serialize};

// ============================================================================
// GeneratorConfig
// ============================================================================

/// Options of one compilation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Target PostgreSQL schema
    pub schema: String,

    /// Primary key column
    pub id: ColumnPolicy,

    /// `create_at` / `update_at` columns
    pub timestamp: ColumnPolicy,

    /// `create_by` / `update_by` columns
    pub operator: ColumnPolicy,

    /// `delete_at` column
    pub soft_delete: ColumnPolicy,

    /// Derive CHECK constraints from validation facets
    pub checks: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            schema: "api".to_string(),
            id: ColumnPolicy::Enabled,
            timestamp: ColumnPolicy::Enabled,
            operator: ColumnPolicy::Disabled,
            soft_delete: ColumnPolicy::Enabled,
            checks: false,
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    pub fn with_id(mut self, policy: ColumnPolicy) -> Self {
        self.id = policy;
        self
    }

    pub fn with_timestamp(mut self, policy: ColumnPolicy) -> Self {
        self.timestamp = policy;
        self
    }

    pub fn with_operator(mut self, policy: ColumnPolicy) -> Self {
        self.operator = policy;
        self
    }

    pub fn with_soft_delete(mut self, policy: ColumnPolicy) -> Self {
        self.soft_delete = policy;
        self
    }

    pub fn with_checks(mut self, checks: bool) -> Self {
        self.checks = checks;
        self
    }
}

// ============================================================================
// CompiledMigration
// ============================================================================

/// Output of [`compile`]
#[derive(Debug, Clone)]
pub struct CompiledMigration {
    /// The IR the script was rendered from
    pub metas: Metas,

    /// The SQL script
    pub sql: String,

    /// Everything reported along the way, in order
    pub warnings: Warnings,
}

impl CompiledMigration {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Validate, generate and render a model.
///
/// # Errors
///
/// Fails on the first validation, type mapping or rendering error; nothing
/// is rendered in that case.
pub fn compile(model: &Model, config: &GeneratorConfig) -> MigrateResult<CompiledMigration> {
    model.validate()?;

    let mut warnings = Warnings::new();
    let lints = Validator::lints().validate(model);
    for warning in lints.warnings {
        warnings.push(warning.into());
    }
    tracing::info!(
        entities = model.len(),
        warnings = warnings.len(),
        "model validated"
    );

    let metas = Generator::new(config.clone()).generate(model, &mut warnings)?;
    let sql = render(&config.schema, &metas, &mut warnings)?;

    tracing::info!(
        schema = %config.schema,
        tables = metas.tables.len(),
        warnings = warnings.len(),
        "migration compiled"
    );

    Ok(CompiledMigration {
        metas,
        sql,
        warnings,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use migrator_core::{MigrateError, WarningKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn model(value: serde_json::Value) -> Model {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_generator_config_default() {
        let config = GeneratorConfig::default();
        assert_eq!(config.schema, "api");
        assert_eq!(config.id, ColumnPolicy::Enabled);
        assert_eq!(config.operator, ColumnPolicy::Disabled);
        assert!(!config.checks);
    }

    #[test]
    fn test_generator_config_deserialize() {
        let config: GeneratorConfig = serde_json::from_value(json!({
            "schema": "shop",
            "id": "uuid",
            "timestamp": "update_at",
            "softDelete": false
        }))
        .unwrap();

        assert_eq!(config.schema, "shop");
        assert_eq!(config.id, ColumnPolicy::named("uuid"));
        assert_eq!(config.soft_delete, ColumnPolicy::Disabled);
        assert_eq!(config.operator, ColumnPolicy::Disabled);
    }

    #[test]
    fn test_empty_policy_list_adds_no_columns() {
        let config: GeneratorConfig =
            serde_json::from_value(json!({ "timestamp": [], "softDelete": [] })).unwrap();
        let compiled = compile(
            &model(json!({
                "foo": { "type": "object", "properties": { "bar": { "type": "integer" } } }
            })),
            &config,
        )
        .unwrap();

        assert_eq!(
            compiled.metas.table("api.foo").unwrap().column_names(),
            vec!["id", "bar"]
        );
    }

    #[test]
    fn test_compile_end_to_end() {
        let compiled = compile(
            &model(json!({
                "foo": { "type": "object", "properties": { "bar": { "type": "integer" } } }
            })),
            &GeneratorConfig::default(),
        )
        .unwrap();

        let expected = "
BEGIN;

CREATE SCHEMA api IF NOT EXISTS;

CREATE TABLE api.foo IF NOT EXISTS (
  id SERIAL PRIMARY KEY,
  bar INTEGER,
  create_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
  update_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
  delete_at TIMESTAMP
);

COMMIT;
";
        assert_eq!(compiled.sql, expected);
        assert!(!compiled.has_warnings());
    }

    #[test]
    fn test_compile_with_enum_and_comments() {
        let compiled = compile(
            &model(json!({
                "user": {
                    "type": "object",
                    "description": "Accounts",
                    "properties": {
                        "role": { "type": "string", "enum": ["admin", "member"], "default": "'member'" }
                    }
                }
            })),
            &GeneratorConfig::default()
                .with_timestamp(ColumnPolicy::Disabled)
                .with_soft_delete(ColumnPolicy::Disabled),
        )
        .unwrap();

        let expected = "
BEGIN;

CREATE SCHEMA api IF NOT EXISTS;

CREATE TYPE api.user_role AS ENUM ('admin', 'member');

CREATE TABLE api.user IF NOT EXISTS (
  id SERIAL PRIMARY KEY,
  role API.USER_ROLE DEFAULT 'member'
);

COMMENT ON TABLE api.user IS 'Accounts';

COMMIT;
";
        assert_eq!(compiled.sql, expected);
    }

    #[test]
    fn test_compile_rejects_invalid_model() {
        let result = compile(
            &model(json!({ "foo": { "type": "string" } })),
            &GeneratorConfig::default(),
        );
        assert!(matches!(result, Err(MigrateError::ModelType { .. })));
    }

    #[test]
    fn test_compile_collects_validation_warnings() {
        let compiled = compile(
            &model(json!({ "empty": { "type": "object" } })),
            &GeneratorConfig::default(),
        )
        .unwrap();

        assert!(compiled.warnings.contains(WarningKind::EmptyEntity));
        assert!(compiled.sql.contains("CREATE TABLE api.empty IF NOT EXISTS ("));
    }
}
