//! Orbit camera view transitions, host loop, and event bus for 3D viewers.
//!
//! Orbis animates an orbit camera between views, either by lerping eye and
//! target in Cartesian space or by sweeping radius and angles around the
//! target (taking the short way around the azimuth seam). User input is
//! suspended while a transition runs and restored when it completes.
//!
//! # Key entry points
//!
//! - [`camera::OrbitController`] - orbit input, limits, and transitions
//! - [`camera::ViewState`] - serializable camera snapshot
//! - [`events::EventBus`] - name-keyed publish/subscribe with per-name
//!   enable gating and one-shot handlers
//! - [`game::Game`] - frame-rate-divided host loop that ticks the camera,
//!   emits per-frame events, and hands frames to a renderer
//! - [`options::Options`] - runtime configuration (camera, transition
//!   defaults, loop pacing)
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use glam::Vec3;
//! use orbis::camera::{OrbitController, TickOutcome, TransitionOptions, ViewState};
//! use orbis::options::CameraOptions;
//!
//! let mut controller = OrbitController::new(&CameraOptions::default(), 16.0 / 9.0);
//! let view = ViewState::spherical(Vec3::ZERO, 60.0, 1.0, 0.5);
//! let _handle = controller
//!     .set_view_state(&view, TransitionOptions::new().with_duration(Duration::from_millis(500)))
//!     .unwrap();
//!
//! while controller.tick(Duration::from_millis(16)) != TickOutcome::Completed {}
//! assert!((controller.distance() - 60.0).abs() < 1e-3);
//! assert!(controller.is_enabled());
//! ```

pub mod camera;
pub mod error;
pub mod events;
pub mod game;
pub mod options;
pub mod util;

pub use error::OrbisError;
