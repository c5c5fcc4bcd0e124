//! Centralized animation options with TOML preset support.
//!
//! Transition timing, preview holds, and export framing are consolidated
//! here. Options serialize to/from TOML so a tuned setup can be saved and
//! shared.

mod export;
mod preview;
mod transition;

use std::path::Path;

pub use export::ExportOptions;
pub use preview::PreviewOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use transition::TransitionOptions;

use crate::error::VistaError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[export]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Live transition parameters.
    pub transition: TransitionOptions,
    /// Preview loop timing.
    pub preview: PreviewOptions,
    /// Export framing.
    pub export: ExportOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults;
    /// out-of-range values are clamped with a warning.
    pub fn from_toml(content: &str) -> Result<Self, VistaError> {
        let mut options: Self = toml::from_str(content)
            .map_err(|e| VistaError::OptionsParse(e.to_string()))?;
        options.preview.sanitize();
        Ok(options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, VistaError> {
        let content = std::fs::read_to_string(path).map_err(VistaError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), VistaError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VistaError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(VistaError::Io)?;
        }
        std::fs::write(path, content).map_err(VistaError::Io)
    }
}
