use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Game Loop", inline)]
#[serde(default)]
/// Host loop pacing and initial viewport.
pub struct GameOptions {
    /// Target rendered frames per second, relative to a 60 Hz tick.
    #[schemars(title = "Frame Rate", range(min = 1, max = 60))]
    pub frame_rate: u32,
    /// Upper bound on the per-frame delta in seconds.
    #[schemars(skip)]
    pub max_delta: f32,
    /// Initial viewport width in pixels.
    #[schemars(skip)]
    pub width: u32,
    /// Initial viewport height in pixels.
    #[schemars(skip)]
    pub height: u32,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            frame_rate: 30,
            max_delta: 1.0,
            width: 1280,
            height: 720,
        }
    }
}

impl GameOptions {
    /// Number of host ticks per rendered frame: `ceil(60 / frame_rate)`.
    #[must_use]
    pub fn frame_interval(&self) -> u32 {
        60_u32.div_ceil(self.frame_rate.max(1))
    }

    /// Initial viewport aspect ratio.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }
}
