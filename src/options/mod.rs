//! Runtime configuration with TOML file support.
//!
//! Camera control, transition defaults, and host-loop pacing are
//! consolidated here. Options serialize to/from TOML; every section uses
//! `#[serde(default)]` so partial files work.

mod camera;
mod game;
mod transition;

use std::path::Path;

pub use camera::CameraOptions;
pub use game::GameOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use transition::TransitionDefaults;

use crate::error::OrbisError;

/// Top-level options container.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and orbit control parameters.
    pub camera: CameraOptions,
    /// Default timing and easing for camera transitions.
    pub transition: TransitionDefaults,
    /// Host loop pacing.
    pub game: GameOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, OrbisError> {
        let content = std::fs::read_to_string(path)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| OrbisError::OptionsParse(e.to_string()))?;
        // Reject bad easing names at load time rather than on first use.
        let _ = options.transition.easing()?;
        log::info!("Loaded options from '{}'", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), OrbisError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| OrbisError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        log::info!("Saved options to '{}'", path.display());
        Ok(())
    }
}
