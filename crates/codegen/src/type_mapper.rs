//! # Type Mapper
//!
//! Maps a schema node to a PostgreSQL column type. Resolution order, first
//! match wins:
//!
//! 1. `$ref` → `serial`
//! 2. `array` → mapped `items` + `[]`
//! 3. `enum` → the column's enum type
//! 4. `number` / `integer` by `format`
//! 5. `string` by `format` (and `maxLength`)
//! 6. `boolean`
//! 7. the declared `type`, verbatim

use crate::context::ColumnContext;
use migrator_core::{MigrateError, MigrateResult, WarningKind, Warnings};
use migrator_ir::{NodeKind, SchemaNode};

/// Resolve the SQL type of a column
///
/// # Errors
///
/// - `MissingItems` for an array without `items`
/// - `InvalidEnumBaseType` for an enum whose type is not numeric or string
pub fn map_type(
    node: &SchemaNode,
    ctx: &ColumnContext<'_>,
    warnings: &mut Warnings,
) -> MigrateResult<String> {
    match &node.kind {
        NodeKind::Reference { .. } => Ok("serial".to_string()),

        NodeKind::Array { items } => {
            let items = items
                .as_deref()
                .ok_or_else(|| MigrateError::missing_items(ctx.qualified_name()))?;
            Ok(format!("{}[]", map_type(items, ctx, warnings)?))
        }

        NodeKind::Enum { .. } => match node.type_name() {
            "number" | "integer" | "string" => Ok(ctx.enum_type_name()),
            "" => Err(MigrateError::invalid_enum_base(ctx.qualified_name(), "none")),
            other => Err(MigrateError::invalid_enum_base(ctx.qualified_name(), other)),
        },

        NodeKind::Scalar { format } => {
            let format = format.as_deref();
            let mapped = match node.type_name() {
                "number" | "integer" => Some(numeric_type(format, ctx, warnings)),
                "string" => string_type(format, node.facets.max_length),
                "boolean" => Some("boolean".to_string()),
                _ => None,
            };
            Ok(mapped.unwrap_or_else(|| node.type_name().to_string()))
        }

        NodeKind::Object { .. } => Ok(node.type_name().to_string()),
    }
}

fn numeric_type(format: Option<&str>, ctx: &ColumnContext<'_>, warnings: &mut Warnings) -> String {
    let ty = match format {
        None | Some("int4") | Some("integer") | Some("number") => "integer",
        Some("int2") => "smallint",
        Some("int8") => "bigint",
        Some("uint") | Some("uint4") => "serial",
        Some("uint2") => "smallserial",
        Some("uint8") => "bigserial",
        Some("float") => "real",
        Some("double") => "double precision",
        Some(exact @ ("decimal" | "numeric")) => exact,
        Some(unknown) => {
            warnings.warn(
                WarningKind::UnknownNumericFormat,
                ctx.qualified_name(),
                format!("Unknown numeric format '{}', falling back to integer", unknown),
            );
            "integer"
        }
    };
    ty.to_string()
}

/// `None` lets an unrecognized string format fall through to the raw type
fn string_type(format: Option<&str>, max_length: Option<u64>) -> Option<String> {
    let with_length = |base: &str| match max_length {
        Some(n) => format!("{}({})", base, n),
        None => base.to_string(),
    };

    let ty = match format {
        Some("binary") | Some("byte") | Some("text") => "text".to_string(),
        Some("date") => "date".to_string(),
        Some("date-time") => "timestamp".to_string(),
        Some("uuid") => "uuid".to_string(),
        Some("ipv4") | Some("ipv6") => "cidr".to_string(),
        Some("character") | Some("char") => with_length("character"),
        None | Some("character varying") | Some("varchar") => with_length("character varying"),
        Some(_) => return None,
    };
    Some(ty)
}

// ============================================================================
// Tests
// ============================================================================
