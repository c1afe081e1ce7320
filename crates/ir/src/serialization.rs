//! Loading input models from JSON and YAML
//!
//! The format is chosen by file extension (`.json`, `.yaml`, `.yml`), or
//! given explicitly when reading from a string such as stdin.

use crate::model::Model;
use migrator_core::{MigrateError, MigrateResult};
use std::path::Path;
use std::str::FromStr;

// ============================================================================
// ModelFormat
// ============================================================================

/// Text format of a model document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelFormat {
    #[default]
    Json,
    Yaml,
}

impl ModelFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: impl AsRef<Path>) -> MigrateResult<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(ModelFormat::Json),
            Some("yaml") | Some("yml") => Ok(ModelFormat::Yaml),
            _ => Err(MigrateError::UnsupportedFileType(
                path.display().to_string(),
            )),
        }
    }
}

impl FromStr for ModelFormat {
    type Err = MigrateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ModelFormat::Json),
            "yaml" | "yml" => Ok(ModelFormat::Yaml),
            other => Err(MigrateError::UnsupportedFileType(other.to_string())),
        }
    }
}

impl std::fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelFormat::Json => write!(f, "json"),
            ModelFormat::Yaml => write!(f, "yaml"),
        }
    }
}

// ============================================================================
// Load Functions
// ============================================================================

/// Load a model from a file
///
/// # Example
///
/// ```rust,ignore
/// use migrator_ir::load_model;
///
/// let model = load_model("schema.yaml")?;
/// println!("Loaded {} entities", model.len());
/// ```
pub fn load_model(path: impl AsRef<Path>) -> MigrateResult<Model> {
    let path = path.as_ref();
    let format = ModelFormat::from_path(path)?;

    let text = std::fs::read_to_string(path).map_err(|e| MigrateError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let model = load_model_from_str(&text, format)?;
    tracing::debug!(path = %path.display(), %format, entities = model.len(), "model loaded");
    Ok(model)
}

/// Load a model from text in the given format
pub fn load_model_from_str(text: &str, format: ModelFormat) -> MigrateResult<Model> {
    let model = match format {
        ModelFormat::Json => serde_json::from_str(text)?,
        ModelFormat::Yaml => serde_yaml::from_str(text)?,
    };
    Ok(model)
}

// ============================================================================
// Tests
// ============================================================================
