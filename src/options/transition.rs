use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::transition::TransitionOptions;
use crate::error::OrbisError;
use crate::util::easing::Easing;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Transition", inline)]
#[serde(default)]
/// Defaults applied to camera transitions started without explicit timing.
pub struct TransitionDefaults {
    /// Animation length in milliseconds.
    #[schemars(title = "Duration (ms)", range(min = 0, max = 10000))]
    pub duration_ms: u64,
    /// Wait before the first step, in milliseconds.
    #[schemars(title = "Delay (ms)", range(min = 0, max = 10000))]
    pub delay_ms: u64,
    /// Easing family name (e.g. "Cubic", "Elastic").
    #[schemars(title = "Easing")]
    pub easing: String,
    /// Easing direction name ("In", "Out", "InOut").
    #[schemars(title = "Direction")]
    pub direction: String,
}

impl Default for TransitionDefaults {
    fn default() -> Self {
        Self {
            duration_ms: 1000,
            delay_ms: 0,
            easing: "Cubic".into(),
            direction: "Out".into(),
        }
    }
}

impl TransitionDefaults {
    /// Parsed easing curve.
    pub fn easing(&self) -> Result<Easing, OrbisError> {
        Easing::from_names(&self.easing, &self.direction)
    }

    /// Fresh transition options carrying these defaults.
    pub fn to_options(&self) -> Result<TransitionOptions, OrbisError> {
        Ok(TransitionOptions::new()
            .with_duration(Duration::from_millis(self.duration_ms))
            .with_delay(Duration::from_millis(self.delay_ms))
            .with_easing(self.easing()?))
    }
}
