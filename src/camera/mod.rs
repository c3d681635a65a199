//! Orbit camera with animated view transitions.
//!
//! Provides the perspective camera, spherical coordinate helpers, view
//! state snapshots, the transition runner, and pointer input handling.

/// Orbit controller: user input, limits, and transition driving.
pub mod controller;
/// Core camera struct and projection helpers.
pub mod core;
/// Platform-agnostic pointer input handler.
pub mod input;
/// Spherical coordinates and azimuth wrapping.
pub mod spherical;
/// Serializable view snapshots and validated camera states.
pub mod state;
/// Transition options, sessions, and handles.
pub mod transition;

pub use controller::{OrbitController, TickOutcome};
pub use state::{CameraState, ViewState};
pub use transition::{TransitionHandle, TransitionOptions, TransitionStatus};
