//! Validation rules for input models
//!
//! The validator runs before generation. A failed result aborts the run;
//! warnings are reported and the run continues.

use crate::model::Model;
use migrator_core::{MigrateError, MigrateResult, Warning, WarningKind};

// ============================================================================
// ValidationResult
// ============================================================================

/// Result of a validation operation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the validation passed
    pub valid: bool,

    /// List of errors (empty if valid)
    pub errors: Vec<ValidationError>,

    /// List of warnings (non-fatal issues)
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Create a failed validation result with an error
    pub fn error(error: ValidationError) -> Self {
        Self {
            valid: false,
            errors: vec![error],
            warnings: Vec::new(),
        }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, error: ValidationError) {
        self.valid = false;
        self.errors.push(error);
    }

    /// Add a warning to the result
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Merge another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// All error messages joined with `; `
    pub fn message(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.message.clone())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Convert to MigrateResult, surfacing the first error
    pub fn to_result(self) -> MigrateResult<()> {
        match self.errors.into_iter().next() {
            None => Ok(()),
            Some(error) => Err(error.into_error()),
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

// ============================================================================
// ValidationError
// ============================================================================

/// A validation error
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Error code for programmatic handling
    pub code: ValidationErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Entity the error belongs to
    pub entity: String,

    /// Offending value (the declared type for `NotAnObject`)
    pub found: String,
}

impl ValidationError {
    pub fn new(
        code: ValidationErrorCode,
        entity: impl Into<String>,
        found: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            entity: entity.into(),
            found: found.into(),
        }
    }

    /// Turn into the matching `MigrateError`
    pub fn into_error(self) -> MigrateError {
        match self.code {
            ValidationErrorCode::NotAnObject => MigrateError::model_type(self.entity, self.found),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.entity, self.message)
    }
}

/// Error codes for validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorCode {
    /// Top-level entity whose `type` is not `object`
    NotAnObject,
}

// ============================================================================
// ValidationWarning
// ============================================================================

/// A validation warning (non-fatal issue)
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub code: ValidationWarningCode,
    pub message: String,
    /// Dotted path to the element (`entity` or `entity.property`)
    pub path: String,
}

impl ValidationWarning {
    pub fn new(
        code: ValidationWarningCode,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: path.into(),
        }
    }
}

impl From<ValidationWarning> for Warning {
    fn from(warning: ValidationWarning) -> Self {
        let kind = match warning.code {
            ValidationWarningCode::NoProperties => WarningKind::EmptyEntity,
            ValidationWarningCode::UnquotedIdentifier => WarningKind::UnquotedIdentifier,
        };
        Warning::new(kind, warning.path, warning.message)
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] Warning: {}", self.path, self.message)
    }
}

/// Warning codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationWarningCode {
    /// Object entity without properties
    NoProperties,
    /// Name that would need quoting in SQL
    UnquotedIdentifier,
}

// ============================================================================
// ValidationRule Trait
// ============================================================================

/// Trait for validation rules
pub trait ValidationRule {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn validate(&self, model: &Model) -> ValidationResult;
}

// ============================================================================
// Validator
// ============================================================================

/// Model validator that runs multiple validation rules
#[derive(Default)]
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a validator with the built-in rules
    pub fn with_default_rules() -> Self {
        let mut validator = Self::fatal();
        validator.rules.extend(Self::lints().rules);
        validator
    }

    /// The checks that abort a run: every entity is an object
    pub fn fatal() -> Self {
        let mut validator = Self::new();
        validator.add_rule(Box::new(EntityTypeRule));
        validator
    }

    /// The checks that only warn
    pub fn lints() -> Self {
        let mut validator = Self::new();
        validator.add_rule(Box::new(EntityPropertiesRule));
        validator.add_rule(Box::new(IdentifierRule));
        validator
    }

    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Validate a model with all rules
    pub fn validate(&self, model: &Model) -> ValidationResult {
        let mut result = ValidationResult::ok();

        for rule in &self.rules {
            let rule_result = rule.validate(model);
            tracing::trace!(
                rule = rule.name(),
                errors = rule_result.errors.len(),
                "validation rule finished"
            );
            result.merge(rule_result);
        }

        result
    }

    /// Validate and return Result
    pub fn validate_result(&self, model: &Model) -> MigrateResult<()> {
        self.validate(model).to_result()
    }
}

/// Validate a model with the built-in rules
pub fn validate(model: &Model) -> ValidationResult {
    Validator::with_default_rules().validate(model)
}

// ============================================================================
// Built-in Validation Rules
// ============================================================================

/// Rule: every top-level entity is an object
pub struct EntityTypeRule;

impl ValidationRule for EntityTypeRule {
    fn name(&self) -> &'static str {
        "entity_type"
    }

    fn description(&self) -> &'static str {
        "Validates that every entity is declared with type object"
    }

    fn validate(&self, model: &Model) -> ValidationResult {
        let mut result = ValidationResult::ok();

        for (name, node) in model.entities() {
            if !node.is_object() {
                let found = node.shape();
                result.add_error(ValidationError::new(
                    ValidationErrorCode::NotAnObject,
                    name,
                    found.as_str(),
                    format!("Entity '{}' must be of type object, but got {}", name, found),
                ));
            }
        }

        result
    }
}

/// Rule: object entities declare at least one property
pub struct EntityPropertiesRule;

impl ValidationRule for EntityPropertiesRule {
    fn name(&self) -> &'static str {
        "entity_properties"
    }

    fn description(&self) -> &'static str {
        "Warns about entities without declared properties"
    }

    fn validate(&self, model: &Model) -> ValidationResult {
        let mut result = ValidationResult::ok();

        for (name, node) in model.entities() {
            if node.properties().is_some_and(|p| p.is_empty()) {
                result.add_warning(ValidationWarning::new(
                    ValidationWarningCode::NoProperties,
                    name,
                    format!("Entity '{}' has no properties", name),
                ));
            }
        }

        result
    }
}

/// Rule: entity and property names are plain SQL identifiers
pub struct IdentifierRule;

impl ValidationRule for IdentifierRule {
    fn name(&self) -> &'static str {
        "identifiers"
    }

    fn description(&self) -> &'static str {
        "Warns about names that PostgreSQL would need quoted"
    }

    fn validate(&self, model: &Model) -> ValidationResult {
        let mut result = ValidationResult::ok();

        for (name, node) in model.entities() {
            if !is_valid_identifier(name) {
                result.add_warning(ValidationWarning::new(
                    ValidationWarningCode::UnquotedIdentifier,
                    name,
                    format!("Entity name '{}' is not a plain identifier", name),
                ));
            }

            for property in node.properties().into_iter().flat_map(|p| p.keys()) {
                if !is_valid_identifier(property) {
                    result.add_warning(ValidationWarning::new(
                        ValidationWarningCode::UnquotedIdentifier,
                        format!("{}.{}", name, property),
                        format!("Property name '{}' is not a plain identifier", property),
                    ));
                }
            }
        }

        result
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Check if a string is a valid unquoted identifier
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();

    // First character must be letter or underscore
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }

    // Rest must be alphanumeric or underscore
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model(value: serde_json::Value) -> Model {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_validation_result_merge() {
        let mut result = ValidationResult::ok();
        result.merge(ValidationResult::error(ValidationError::new(
            ValidationErrorCode::NotAnObject,
            "foo",
            "string",
            "Error",
        )));

        assert!(!result.valid);
        assert!(result.has_errors());
    }

    #[test]
    fn test_validator_accepts_objects() {
        let result = validate(&model(json!({
            "user": { "type": "object", "properties": { "name": { "type": "string" } } }
        })));

        assert!(result.valid);
        assert!(!result.has_warnings());
        assert!(result.to_result().is_ok());
    }

    #[test]
    fn test_validator_rejects_non_object_entity() {
        let result = validate(&model(json!({
            "user": { "type": "object" },
            "foo": { "type": "string" }
        })));

        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].entity, "foo");
        assert!(result.message().contains("string"));

        match result.to_result() {
            Err(MigrateError::ModelType { entity, found }) => {
                assert_eq!(entity, "foo");
                assert_eq!(found, "string");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_object_typed_enum_or_reference_is_rejected() {
        let result = validate(&model(json!({
            "status": { "type": "object", "enum": ["a", "b"] },
            "owner": { "type": "object", "$ref": "#/user" }
        })));

        assert!(!result.valid);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[0].found, "enum of object");
        assert_eq!(result.errors[1].found, "$ref");
        assert!(result.errors[1].message.contains("but got $ref"));
    }

    #[test]
    fn test_lints_never_fail() {
        let model = model(json!({
            "foo": { "type": "string" },
            "empty": { "type": "object" }
        }));

        let lints = Validator::lints().validate(&model);
        assert!(lints.valid);
        assert!(lints.has_warnings());
        assert!(Validator::fatal().validate_result(&model).is_err());
    }

    #[test]
    fn test_validator_missing_type() {
        let result = validate(&model(json!({ "foo": {} })));
        assert!(!result.valid);
        assert_eq!(result.errors[0].found, "none");
    }

    #[test]
    fn test_entity_without_properties_warns() {
        let result = EntityPropertiesRule.validate(&model(json!({ "empty": { "type": "object" } })));

        assert!(result.valid);
        assert_eq!(result.warnings[0].code, ValidationWarningCode::NoProperties);

        let warning: Warning = result.warnings[0].clone().into();
        assert_eq!(warning.kind, WarningKind::EmptyEntity);
        assert_eq!(warning.target, "empty");
    }

    #[test]
    fn test_identifier_rule() {
        let result = IdentifierRule.validate(&model(json!({
            "user-profile": {
                "type": "object",
                "properties": { "first name": { "type": "string" }, "ok": { "type": "string" } }
            }
        })));

        assert!(result.valid);
        let paths: Vec<_> = result.warnings.iter().map(|w| w.path.as_str()).collect();
        assert_eq!(paths, vec!["user-profile", "user-profile.first name"]);
    }

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("user_id"));
        assert!(is_valid_identifier("_private"));
        assert!(is_valid_identifier("user123"));

        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("123user"));
        assert!(!is_valid_identifier("user-id"));
        assert!(!is_valid_identifier("user id"));
    }
}
