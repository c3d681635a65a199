use crate::camera::state::ViewState;

/// Emitted once per rendered frame with the clamped frame delta.
pub const UPDATE: &str = "update";
/// Emitted after the viewport has been resized.
pub const VIEW_SIZE_CHANGED: &str = "viewSizeChanged";
/// Emitted on the frame a camera transition completes.
pub const TRANSITION_COMPLETE: &str = "transitionComplete";

/// Payload carried by the [`Game`](crate::game::Game) event bus.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// Per-frame tick.
    Update {
        /// Seconds since the previous rendered frame, clamped.
        delta: f32,
    },
    /// Viewport size change.
    ViewSizeChanged {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
    /// A camera transition reached its target.
    TransitionComplete {
        /// Camera view after the final step.
        view: ViewState,
    },
    /// Application-defined payload.
    Custom(serde_json::Value),
}

impl Signal {
    /// Frame delta for [`Signal::Update`], `None` otherwise.
    #[must_use]
    pub fn delta(&self) -> Option<f32> {
        match self {
            Self::Update { delta } => Some(*delta),
            _ => None,
        }
    }
}
