//! # SQL Renderer
//!
//! Turns [`Metas`] into one transaction-wrapped DDL script. Output is fully
//! determined by the input:
//!
//! ```text
//!
//! BEGIN;
//!
//! CREATE SCHEMA api IF NOT EXISTS;
//!
//! CREATE TYPE api.user_status AS ENUM ('active', 'banned');
//!
//! CREATE TABLE api.user IF NOT EXISTS (
//!   id SERIAL PRIMARY KEY,
//!   status API.USER_STATUS
//! );
//!
//! COMMENT ON TABLE api.user IS 'All users';
//!
//! COMMIT;
//! ```
//!
//! Groups without entries are left out.

use migrator_core::{
    ColumnField, MigrateError, MigrateResult, WarningKind, Warnings, quote_sql_string,
};
use migrator_ir::{Column, Comment, EnumType, Metas, Table};

/// Render the whole migration script
pub fn render(schema: &str, metas: &Metas, warnings: &mut Warnings) -> MigrateResult<String> {
    let mut groups = vec![render_schema(schema)];

    if !metas.types.is_empty() {
        let types: Vec<String> = metas
            .types
            .iter()
            .map(|t| render_type(t, warnings))
            .collect();
        groups.push(types.join("\n\n"));
    }

    if !metas.tables.is_empty() {
        let tables = metas
            .tables
            .iter()
            .map(|t| render_table(t, warnings))
            .collect::<MigrateResult<Vec<_>>>()?;
        groups.push(tables.join("\n\n"));
    }

    if !metas.comments.is_empty() {
        let comments: Vec<String> = metas
            .comments
            .iter()
            .map(|c| render_comment(c, warnings))
            .collect();
        groups.push(comments.join("\n"));
    }

    let sql = format!("\nBEGIN;\n\n{}\n\nCOMMIT;\n", groups.join("\n\n"));
    tracing::debug!(bytes = sql.len(), "sql rendered");
    Ok(sql)
}

pub fn render_schema(schema: &str) -> String {
    format!("CREATE SCHEMA {} IF NOT EXISTS;", schema)
}

/// `CREATE TYPE ... AS ENUM (...)`
pub fn render_type(enum_type: &EnumType, warnings: &mut Warnings) -> String {
    if enum_type.enums.is_empty() {
        warnings.warn(
            WarningKind::EmptyEnum,
            enum_type.name.as_str(),
            "Enum type has no values",
        );
    }

    let values: Vec<String> = enum_type.enums.iter().map(|v| v.to_sql_literal()).collect();
    format!(
        "CREATE TYPE {} AS ENUM ({});",
        enum_type.name,
        values.join(", ")
    )
}

/// `CREATE TABLE ... IF NOT EXISTS (...)`
pub fn render_table(table: &Table, warnings: &mut Warnings) -> MigrateResult<String> {
    if table.columns.is_empty() {
        warnings.warn(
            WarningKind::EmptyColumns,
            table.name.as_str(),
            "Table has no columns",
        );
        return Ok(format!("CREATE TABLE {} IF NOT EXISTS ();", table.name));
    }

    let columns = table
        .columns
        .iter()
        .map(render_column)
        .collect::<MigrateResult<Vec<_>>>()?;

    Ok(format!(
        "CREATE TABLE {} IF NOT EXISTS (\n  {}\n);",
        table.name,
        columns.join(",\n  ")
    ))
}

/// One column definition: `<name> <TYPE> [constraints]`
pub fn render_column(column: &Column) -> MigrateResult<String> {
    if column.name.is_empty() {
        return Err(MigrateError::missing_column_field(ColumnField::Name, None));
    }
    if column.ty.is_empty() {
        return Err(MigrateError::missing_column_field(
            ColumnField::Type,
            Some(column.name.as_str()),
        ));
    }

    let mut parts = vec![column.name.clone(), column.ty.to_uppercase()];

    if column.is_primary_key() {
        parts.push("PRIMARY KEY".to_string());
    }
    if column.is_not_null() {
        parts.push("NOT NULL".to_string());
    }
    if column.is_unique() {
        parts.push("UNIQUE".to_string());
    }
    if let Some(default) = &column.default {
        parts.push(format!("DEFAULT {}", default));
    }
    if let Some(check) = column.check.as_deref().filter(|c| !c.is_empty()) {
        parts.push(format!("CHECK {}", check));
    }

    Ok(parts.join(" "))
}

/// `COMMENT ON <TABLE|COLUMN> ... IS '...';`
pub fn render_comment(comment: &Comment, warnings: &mut Warnings) -> String {
    if comment.content.trim().is_empty() {
        warnings.warn(
            WarningKind::BlankComment,
            comment.target.as_str(),
            format!("Comment on {} is blank", comment.kind),
        );
    }

    format!(
        "COMMENT ON {} {} IS {};",
        comment.kind.keyword(),
        comment.target,
        quote_sql_string(&comment.content)
    )
}

// ============================================================================
// Tests
// ============================================================================
