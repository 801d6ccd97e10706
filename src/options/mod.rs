//! Centralized camera options with TOML support.
//!
//! Dolly, compositor, free-look and speed-modifier settings are consolidated
//! here. Options parse from TOML text; where that text lives is up to the
//! host application.

mod compositor;
mod dolly;
mod free_look;
mod speed;

pub use compositor::CompositorOptions;
pub use dolly::DollyOptions;
pub use free_look::FreeLookOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use speed::SpeedOptions;

use crate::error::DollyError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML (e.g. only overriding `[dolly]`) works correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Dolly path and playback parameters.
    pub dolly: DollyOptions,
    /// Update arbitration rules.
    pub compositor: CompositorOptions,
    /// Free-look sensitivities and limits.
    pub free_look: FreeLookOptions,
    /// Sprint/slow multipliers.
    pub speed: SpeedOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, DollyError> {
        toml::from_str(content)
            .map_err(|e| DollyError::OptionsParse(e.to_string()))
    }

    /// Copy of these options with `section.field` set to `value`, as sent
    /// by a remote settings panel.
    pub fn with_field(
        &self,
        section: &str,
        field: &str,
        value: serde_json::Value,
    ) -> Result<Self, DollyError> {
        let mut root = serde_json::to_value(self)
            .map_err(|e| DollyError::InvalidOption(e.to_string()))?;
        let slot = root
            .get_mut(section)
            .and_then(|s| s.get_mut(field))
            .ok_or_else(|| {
                DollyError::InvalidOption(format!("{section}.{field}"))
            })?;
        *slot = value;
        serde_json::from_value(root).map_err(|e| {
            DollyError::InvalidOption(format!("{section}.{field}: {e}"))
        })
    }
}
