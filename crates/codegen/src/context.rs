//! # Naming Context
//!
//! Every name the generator and the type mapper derive for a column comes
//! from a [`ColumnContext`], so that an enum column's type reference and the
//! matching `CREATE TYPE` entry always agree.
//!
//! ```text
//! table        api.user
//! column       api.user.status
//! enum type    api.user_status
//! ```

/// Where an entity lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableContext<'a> {
    pub schema: &'a str,
    pub table: &'a str,
}

impl<'a> TableContext<'a> {
    pub fn new(schema: &'a str, table: &'a str) -> Self {
        Self { schema, table }
    }

    /// `<schema>.<table>`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema, self.table)
    }

    /// Narrow to one column of this table
    pub fn column(&self, column: &'a str) -> ColumnContext<'a> {
        ColumnContext {
            schema: self.schema,
            table: self.table,
            column,
        }
    }
}

/// Where a column lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnContext<'a> {
    pub schema: &'a str,
    pub table: &'a str,
    pub column: &'a str,
}

impl<'a> ColumnContext<'a> {
    pub fn new(schema: &'a str, table: &'a str, column: &'a str) -> Self {
        Self {
            schema,
            table,
            column,
        }
    }

    /// `<schema>.<table>`
    pub fn table_name(&self) -> String {
        format!("{}.{}", self.schema, self.table)
    }

    /// `<schema>.<table>.<column>`, used for comments and diagnostics
    pub fn qualified_name(&self) -> String {
        format!("{}.{}.{}", self.schema, self.table, self.column)
    }

    /// `<schema>.<table>_<column>`
    pub fn enum_type_name(&self) -> String {
        format!("{}.{}_{}", self.schema, self.table, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        let table = TableContext::new("api", "user");
        let column = table.column("status");

        assert_eq!(table.qualified_name(), "api.user");
        assert_eq!(column.table_name(), "api.user");
        assert_eq!(column.qualified_name(), "api.user.status");
        assert_eq!(column.enum_type_name(), "api.user_status");
    }
}
