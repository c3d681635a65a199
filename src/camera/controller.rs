use std::f32::consts::PI;
use std::time::Duration;

use glam::{Vec2, Vec3};

use super::core::Camera;
use super::spherical::{normalize_azimuth, SphericalCoords};
use super::state::ViewState;
use super::transition::{
    InputGuard, Step, TransitionHandle, TransitionOptions, TransitionSession,
};
use crate::error::OrbisError;
use crate::options::CameraOptions;

/// Keeps the eye off the poles so the look-at basis stays defined.
const POLAR_EPSILON: f32 = 1e-6;
/// Lowest damping factor; anything smaller would never drain queued input.
const MIN_DAMPING_FACTOR: f32 = 0.01;
/// Pending input below this magnitude is dropped.
const INERTIA_EPSILON: f32 = 1e-6;

/// What a call to [`OrbitController::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No transition; user input (if any) was applied.
    Idle,
    /// A transition is pending or inside its delay.
    Waiting,
    /// A transition stepped to an intermediate pose.
    Updated,
    /// A transition reached its target this tick.
    Completed,
    /// A stopped transition was discarded this tick.
    Cancelled,
}

/// Orbit camera controller with animated view transitions.
///
/// User input (rotate, pan, zoom) accumulates while the controller is
/// enabled and is applied by [`update`](Self::update). A transition
/// disables input for its lifetime and restores the previous flag when it
/// completes.
pub struct OrbitController {
    camera: Camera,
    enabled: bool,

    enable_damping: bool,
    damping_factor: f32,
    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
    min_distance: f32,
    max_distance: f32,

    /// Pending (azimuth, polar) rotation in radians.
    orbit_delta: Vec2,
    pan_offset: Vec3,
    zoom_scale: f32,

    session: Option<TransitionSession>,
}

impl OrbitController {
    /// Create a controller from camera options.
    #[must_use]
    pub fn new(options: &CameraOptions, aspect: f32) -> Self {
        Self::with_camera(Camera::from_options(options, aspect), options)
    }

    /// Create a controller driving an existing camera.
    #[must_use]
    pub fn with_camera(camera: Camera, options: &CameraOptions) -> Self {
        Self {
            camera,
            enabled: true,
            enable_damping: options.enable_damping,
            damping_factor: options.damping_factor.clamp(MIN_DAMPING_FACTOR, 1.0),
            rotate_speed: options.rotate_speed,
            pan_speed: options.pan_speed,
            zoom_speed: options.zoom_speed,
            min_distance: options.min_distance,
            max_distance: options.max_distance.max(options.min_distance),
            orbit_delta: Vec2::ZERO,
            pan_offset: Vec3::ZERO,
            zoom_scale: 1.0,
            session: None,
        }
    }

    /// The driven camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Orbit target.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.camera.target
    }

    /// Update the viewport aspect ratio.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.aspect = aspect;
    }

    /// Whether user input is accepted.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Accept or ignore user input. A running transition overwrites this
    /// with its saved value when it completes.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Eye offset from the target in spherical form.
    #[must_use]
    pub fn spherical(&self) -> SphericalCoords {
        SphericalCoords::from_offset(self.camera.eye - self.camera.target)
    }

    /// Eye distance from the target.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.camera.eye.distance(self.camera.target)
    }

    /// Angle of the eye from +Y, in [0, π].
    #[must_use]
    pub fn polar_angle(&self) -> f32 {
        self.spherical().polar
    }

    /// Angle of the eye around +Y, in (-π, π].
    #[must_use]
    pub fn azimuthal_angle(&self) -> f32 {
        self.spherical().azimuth
    }

    // -- User input ------------------------------------------------------

    /// Queue an orbit by a drag of `delta` pixels. Ignored while disabled.
    pub fn rotate(&mut self, delta: Vec2) -> bool {
        if !self.enabled {
            return false;
        }
        self.orbit_delta -= delta * self.rotate_speed;
        true
    }

    /// Queue a pan by a drag of `delta` pixels. Ignored while disabled.
    pub fn pan(&mut self, delta: Vec2) -> bool {
        if !self.enabled {
            return false;
        }
        let forward = self.camera.forward();
        let right = forward.cross(self.camera.up).normalize_or_zero();
        let up = right.cross(forward);
        let scale = self.distance() * self.pan_speed;
        self.pan_offset += right * (-delta.x * scale) + up * (delta.y * scale);
        true
    }

    /// Queue a zoom by `delta` scroll units (positive = closer). Ignored
    /// while disabled.
    pub fn zoom(&mut self, delta: f32) -> bool {
        if !self.enabled {
            return false;
        }
        self.zoom_scale *= (1.0 - delta * self.zoom_speed).max(0.01);
        true
    }

    /// Drop queued input so it cannot move the camera later.
    pub fn halt_inertia(&mut self) {
        self.orbit_delta = Vec2::ZERO;
        self.pan_offset = Vec3::ZERO;
        self.zoom_scale = 1.0;
    }

    /// Apply queued input and distance/angle limits to the camera.
    ///
    /// With damping, only a fraction of the queued input is applied and
    /// the rest decays over later calls. Returns whether the camera moved.
    pub fn update(&mut self) -> bool {
        let mut s = self.spherical();
        let out_of_bounds = s.polar < POLAR_EPSILON
            || s.polar > PI - POLAR_EPSILON
            || s.radius < self.min_distance
            || s.radius > self.max_distance;
        let has_input = self.orbit_delta != Vec2::ZERO
            || self.pan_offset != Vec3::ZERO
            || self.zoom_scale != 1.0;
        if !has_input && !out_of_bounds {
            return false;
        }

        let factor = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        s.azimuth = normalize_azimuth(s.azimuth + self.orbit_delta.x * factor);
        s.polar = (s.polar + self.orbit_delta.y * factor)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        s.radius = (s.radius * self.zoom_scale)
            .clamp(self.min_distance, self.max_distance);

        let previous_eye = self.camera.eye;
        let previous_target = self.camera.target;
        self.camera.target += self.pan_offset * factor;
        self.camera.eye = self.camera.target + s.to_offset();

        if self.enable_damping {
            self.orbit_delta *= 1.0 - factor;
            self.pan_offset *= 1.0 - factor;
            if self.orbit_delta.length() < INERTIA_EPSILON {
                self.orbit_delta = Vec2::ZERO;
            }
            if self.pan_offset.length() < INERTIA_EPSILON {
                self.pan_offset = Vec3::ZERO;
            }
        } else {
            self.orbit_delta = Vec2::ZERO;
            self.pan_offset = Vec3::ZERO;
        }
        self.zoom_scale = 1.0;

        previous_eye.distance_squared(self.camera.eye) > INERTIA_EPSILON
            || previous_target.distance_squared(self.camera.target)
                > INERTIA_EPSILON
    }

    // -- View state --------------------------------------------------------

    /// Snapshot of the current view with both Cartesian and spherical
    /// fields filled in.
    #[must_use]
    pub fn view_state(&self) -> ViewState {
        let s = self.spherical();
        ViewState {
            target: self.camera.target,
            position: Some(self.camera.eye),
            radius: Some(s.radius),
            polar_angle: Some(s.polar),
            azimuthal_angle: Some(s.azimuth),
        }
    }

    /// [`view_state`](Self::view_state) rendered as a JSON string.
    pub fn view_state_json(&self) -> Result<String, OrbisError> {
        self.view_state().to_json()
    }

    /// Animate to `state`, starting on the next tick.
    pub fn set_view_state(
        &mut self,
        state: &ViewState,
        options: TransitionOptions,
    ) -> Result<TransitionHandle, OrbisError> {
        self.transition_to(state, options, true)
    }

    /// Animate from the current view to `state`.
    ///
    /// The request is validated first; on error nothing changes. Otherwise
    /// any running transition is cancelled without its completion callback,
    /// the current input flag is saved, input is disabled, and a new
    /// session is installed. With `start_immediately == false` the session
    /// waits for [`TransitionHandle::start`].
    pub fn transition_to(
        &mut self,
        state: &ViewState,
        options: TransitionOptions,
        start_immediately: bool,
    ) -> Result<TransitionHandle, OrbisError> {
        let to = state.resolve(options.use_spherical).inspect_err(|e| {
            log::warn!("Rejected camera transition: {e}");
        })?;

        if let Some(previous) = self.session.take() {
            log::debug!("Replacing camera transition {previous:?}");
            previous.cancel();
        }

        let input = InputGuard::capture(&mut self.enabled);
        self.halt_inertia();

        let session = TransitionSession::new(
            self.camera.eye,
            self.camera.target,
            to,
            options,
            input,
            start_immediately,
        );
        log::debug!("Starting camera transition {session:?}");
        let handle = session.handle();
        self.session = Some(session);
        Ok(handle)
    }

    /// Cancel the running transition, if any. Input stays disabled.
    pub fn stop_transition(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                let active = session.handle().is_active();
                session.cancel();
                active
            }
            None => false,
        }
    }

    /// Whether a transition is pending or running.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.handle().is_active())
    }

    /// The current transition session.
    #[must_use]
    pub fn session(&self) -> Option<&TransitionSession> {
        self.session.as_ref()
    }

    /// Advance by `dt`: step the active transition, or apply user input
    /// when there is none.
    pub fn tick(&mut self, dt: Duration) -> TickOutcome {
        let Some(mut session) = self.session.take() else {
            let _ = self.update();
            return TickOutcome::Idle;
        };

        match session.step(dt) {
            Step::Waiting => {
                self.session = Some(session);
                TickOutcome::Waiting
            }
            Step::Cancelled => {
                log::debug!("Discarded stopped camera transition");
                let _ = self.update();
                TickOutcome::Cancelled
            }
            Step::Frame(frame) => {
                log::trace!("transition step {:.3}", frame.progress);
                self.camera.eye = frame.position;
                self.camera.target = frame.target;
                let _ = self.update();
                session.notify_update(&frame);
                self.session = Some(session);
                TickOutcome::Updated
            }
            Step::Finished(frame) => {
                self.camera.eye = frame.position;
                self.camera.target = frame.target;
                let _ = self.update();
                session.notify_update(&frame);
                session.complete(&mut self.enabled);
                log::debug!("Camera transition complete");
                TickOutcome::Completed
            }
        }
    }
}

impl std::fmt::Debug for OrbitController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrbitController")
            .field("eye", &self.camera.eye)
            .field("target", &self.camera.target)
            .field("enabled", &self.enabled)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
