//! Core traits for pg-migrator
//!
//! This module defines the traits that model types implement to provide
//! consistent validation behavior.

use crate::error::MigrateResult;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return an error if the state cannot be translated.
///
/// # Example
///
/// ```rust,ignore
/// use migrator_core::{MigrateError, MigrateResult, Validatable};
///
/// struct Entity {
///     name: String,
///     kind: String,
/// }
///
/// impl Validatable for Entity {
///     fn validate(&self) -> MigrateResult<()> {
///         if self.kind != "object" {
///             return Err(MigrateError::model_type(&self.name, &self.kind));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or a `MigrateError` describing the problem.
    fn validate(&self) -> MigrateResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) => vec![e.to_string()],
        }
    }
}

// ============================================================================
// Named Trait
// ============================================================================

/// Trait for IR items addressed by a (possibly schema-qualified) name
pub trait Named {
    /// Get the name
    fn name(&self) -> &str;

    /// Check if the name matches (case-insensitive, as PostgreSQL folds
    /// unquoted identifiers)
    fn name_matches(&self, other: &str) -> bool {
        self.name().eq_ignore_ascii_case(other)
    }
}

// ============================================================================
// Tests
// ============================================================================
