//! # Structural Columns
//!
//! Columns added to every table from a [`ColumnPolicy`] rather than from
//! declared properties:
//!
//! | field      | built-in columns                                         |
//! |------------|----------------------------------------------------------|
//! | id         | `id serial PRIMARY KEY`                                  |
//! | timestamp  | `create_at`, `update_at` (`timestamp NOT NULL DEFAULT CURRENT_TIMESTAMP`) |
//! | operator   | `create_by`, `update_by` (`integer DEFAULT -1`)          |
//! | softDelete | `delete_at timestamp`                                    |

use crate::context::TableContext;
use migrator_core::{WarningKind, Warnings};
use migrator_ir::{Column, ColumnPolicy};

/// Primary key column; a tag names its data type
pub fn id_columns(policy: &ColumnPolicy) -> Vec<Column> {
    match policy {
        ColumnPolicy::Enabled => vec![Column::new("id", "serial").primary_key()],
        ColumnPolicy::Named(ty) => vec![Column::new("id", ty.as_str()).primary_key()],
        other => custom_columns(other),
    }
}

/// Creation and update timestamps; a tag keeps only the named one
pub fn timestamp_columns(
    policy: &ColumnPolicy,
    table: &TableContext<'_>,
    warnings: &mut Warnings,
) -> Vec<Column> {
    let pair = ["create_at", "update_at"].map(|name| {
        Column::new(name, "timestamp")
            .nullable(false)
            .with_default("CURRENT_TIMESTAMP")
    });
    pair_columns(policy, pair, "timestamp", table, warnings)
}

/// Creating and updating operator ids; a tag keeps only the named one
pub fn operator_columns(
    policy: &ColumnPolicy,
    table: &TableContext<'_>,
    warnings: &mut Warnings,
) -> Vec<Column> {
    let pair = ["create_by", "update_by"].map(|name| {
        Column::new(name, "integer")
            .nullable(true)
            .with_default("-1")
    });
    pair_columns(policy, pair, "operator", table, warnings)
}

/// Soft-delete marker; a tag names the column
pub fn soft_delete_columns(policy: &ColumnPolicy) -> Vec<Column> {
    match policy {
        ColumnPolicy::Enabled => vec![Column::new("delete_at", "timestamp").nullable(true)],
        ColumnPolicy::Named(name) => vec![Column::new(name.as_str(), "timestamp").nullable(true)],
        other => custom_columns(other),
    }
}

fn pair_columns(
    policy: &ColumnPolicy,
    pair: [Column; 2],
    field: &str,
    table: &TableContext<'_>,
    warnings: &mut Warnings,
) -> Vec<Column> {
    match policy {
        ColumnPolicy::Enabled => pair.into(),
        ColumnPolicy::Named(name) => match pair.iter().find(|c| &c.name == name) {
            Some(column) => vec![column.clone()],
            None => {
                let known: Vec<_> = pair.iter().map(|c| c.name.as_str()).collect();
                warnings.warn(
                    WarningKind::UnknownStructuralColumn,
                    table.qualified_name(),
                    format!(
                        "Unknown {} column '{}', expected one of {}; adding both",
                        field,
                        name,
                        known.join(", ")
                    ),
                );
                pair.into()
            }
        },
        other => custom_columns(other),
    }
}

fn custom_columns(policy: &ColumnPolicy) -> Vec<Column> {
    match policy {
        ColumnPolicy::Custom(column) => vec![column.clone()],
        ColumnPolicy::CustomList(columns) => columns.clone(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migrator_core::Literal;

    fn names(columns: &[Column]) -> Vec<&str> {
        columns.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_id_policies() {
        let built_in = id_columns(&ColumnPolicy::Enabled);
        assert_eq!(built_in, vec![Column::new("id", "serial").primary_key()]);

        let uuid = id_columns(&ColumnPolicy::named("uuid"));
        assert_eq!(uuid[0].ty, "uuid");
        assert!(uuid[0].is_primary_key());

        let custom = Column::new("id", "text").nullable(false);
        assert_eq!(id_columns(&ColumnPolicy::Custom(custom.clone())), vec![custom]);

        assert!(id_columns(&ColumnPolicy::Disabled).is_empty());
    }

    #[test]
    fn test_timestamp_policies() {
        let table = TableContext::new("api", "foo");
        let mut warnings = Warnings::new();

        let both = timestamp_columns(&ColumnPolicy::Enabled, &table, &mut warnings);
        assert_eq!(names(&both), vec!["create_at", "update_at"]);
        assert!(both[0].is_not_null());
        assert_eq!(both[0].default, Some(Literal::from("CURRENT_TIMESTAMP")));

        let one = timestamp_columns(&ColumnPolicy::named("update_at"), &table, &mut warnings);
        assert_eq!(names(&one), vec!["update_at"]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_unknown_tag_warns_and_keeps_pair() {
        let table = TableContext::new("api", "foo");
        let mut warnings = Warnings::new();

        let columns = operator_columns(&ColumnPolicy::named("delete_by"), &table, &mut warnings);
        assert_eq!(names(&columns), vec!["create_by", "update_by"]);
        assert!(warnings.contains(WarningKind::UnknownStructuralColumn));
    }

    #[test]
    fn test_operator_defaults() {
        let table = TableContext::new("api", "foo");
        let mut warnings = Warnings::new();

        let columns = operator_columns(&ColumnPolicy::Enabled, &table, &mut warnings);
        assert_eq!(columns[0].ty, "integer");
        assert!(!columns[0].is_not_null());
        assert_eq!(columns[0].default, Some(Literal::from("-1")));
        assert!(operator_columns(&ColumnPolicy::Disabled, &table, &mut warnings).is_empty());
    }

    #[test]
    fn test_soft_delete_policies() {
        assert_eq!(names(&soft_delete_columns(&ColumnPolicy::Enabled)), vec!["delete_at"]);
        assert_eq!(
            names(&soft_delete_columns(&ColumnPolicy::named("removed_at"))),
            vec!["removed_at"]
        );

        let list = ColumnPolicy::CustomList(vec![
            Column::new("delete_at", "timestamp"),
            Column::new("delete_by", "integer"),
        ]);
        assert_eq!(names(&soft_delete_columns(&list)), vec!["delete_at", "delete_by"]);
    }
}
