//! # Migrator Core
//!
//! Core types, traits, and error handling for pg-migrator.
//!
//! This crate provides the foundational building blocks used throughout
//! the migrator crates, including:
//!
//! - **Types**: `Literal` values for defaults and enum members
//! - **Traits**: `Validatable` and `Named`
//! - **Errors**: Unified error handling with `MigrateError` and `MigrateResult`
//! - **Warnings**: Non-fatal diagnostics collected during a run
//!

pub mod error;
pub mod traits;
pub mod types;
pub mod warning;

// Re-export commonly used items at crate root
pub use error::{ColumnField, MigrateError, MigrateResult, ResultExt};
pub use traits::{Named, Validatable};
pub use types::{Literal, quote_sql_string};
pub use warning::{Warning, WarningKind, Warnings};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
