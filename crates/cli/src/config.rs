//! Configuration file
//!
//! An optional TOML file holding generator options and a connection target:
//!
//! ```toml
//! [generator]
//! schema = "shop"
//! softDelete = false
//! operator = "create_by"
//!
//! [connection]
//! user = "admin"
//! database = "shop"
//! ```
//!
//! `connection` may also be a connect string. Command-line flags override
//! everything read from here.

use crate::connection::ConnectTarget;
use migrator_codegen::GeneratorConfig;
use migrator_core::{MigrateError, MigrateResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub generator: GeneratorConfig,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<ConnectTarget>,
}

impl FileConfig {
    pub fn load(path: impl AsRef<Path>) -> MigrateResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| MigrateError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let config = Self::from_toml(&text)
            .map_err(|e| MigrateError::config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    pub fn from_toml(text: &str) -> MigrateResult<Self> {
        toml::from_str(text).map_err(|e| MigrateError::config(e.to_string()))
    }
}
