use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection, initial placement, and orbit control parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Initial eye position.
    #[schemars(skip)]
    pub position: [f32; 3],
    /// Initial orbit target.
    #[schemars(skip)]
    pub target: [f32; 3],
    /// Orbit radians per pixel of drag.
    #[schemars(title = "Rotate Speed", range(min = 0.001, max = 0.05), extend("step" = 0.001))]
    pub rotate_speed: f32,
    /// Pan distance per pixel, as a fraction of the orbit radius.
    #[schemars(title = "Pan Speed", range(min = 0.0001, max = 0.01), extend("step" = 0.0001))]
    pub pan_speed: f32,
    /// Zoom sensitivity multiplier.
    #[schemars(title = "Zoom Speed", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub zoom_speed: f32,
    /// Ease user input out over several frames instead of applying it at
    /// once.
    #[schemars(title = "Damping")]
    pub enable_damping: bool,
    /// Fraction of the pending input applied per update when damping.
    #[schemars(title = "Damping Factor", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub damping_factor: f32,
    /// Closest allowed orbit radius.
    #[schemars(skip)]
    pub min_distance: f32,
    /// Farthest allowed orbit radius.
    #[schemars(skip)]
    pub max_distance: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 1.0,
            zfar: 10000.0,
            position: [0.0, 40.0, -100.0],
            target: [0.0, 0.0, 0.0],
            rotate_speed: 0.005,
            pan_speed: 0.002,
            zoom_speed: 0.05,
            enable_damping: true,
            damping_factor: 0.1,
            min_distance: 0.0,
            max_distance: f32::MAX,
        }
    }
}
