//! Camera view transitions.
//!
//! A [`TransitionSession`] animates the controller's camera from its pose
//! at request time to a validated [`CameraState`]. Sessions are driven by
//! the host loop through
//! [`OrbitController::tick`](super::controller::OrbitController::tick);
//! nothing here keeps its own timer.
//!
//! Two interpolation paths exist:
//!
//! - **Linear**: eye position and target are lerped independently.
//! - **Spherical**: radius, polar angle, and target are lerped; the
//!   azimuth sweeps the shorter arc around the target and is re-wrapped
//!   into (-π, π] every step.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use glam::Vec3;

use super::spherical::{normalize_azimuth, shortest_azimuth_delta, SphericalCoords};
use super::state::CameraState;
use crate::error::OrbisError;
use crate::util::easing::Easing;

/// Per-step callback.
pub type UpdateCallback = Box<dyn FnMut(&TransitionFrame)>;
/// Completion callback.
pub type CompleteCallback = Box<dyn FnOnce()>;

/// Timing, easing, mode, and callbacks for a transition request.
///
/// ```
/// use std::time::Duration;
/// use orbis::camera::transition::TransitionOptions;
///
/// let options = TransitionOptions::new()
///     .with_duration(Duration::from_millis(500))
///     .with_easing_names("Quintic", "InOut")
///     .unwrap()
///     .on_complete(|| {});
/// assert_eq!(options.duration, Duration::from_millis(500));
/// ```
pub struct TransitionOptions {
    /// Animation length after the delay.
    pub duration: Duration,
    /// Wait before the first step.
    pub delay: Duration,
    /// Progress curve.
    pub easing: Easing,
    /// Force spherical (`Some(true)`) or linear (`Some(false)`)
    /// interpolation. `None` infers from the requested state.
    pub use_spherical: Option<bool>,
    on_update: Option<UpdateCallback>,
    on_complete: Option<CompleteCallback>,
}

impl TransitionOptions {
    /// Defaults: 1000 ms, no delay, Cubic Out, inferred mode.
    #[must_use]
    pub fn new() -> Self {
        Self {
            duration: Duration::from_millis(1000),
            delay: Duration::ZERO,
            easing: Easing::default(),
            use_spherical: None,
            on_update: None,
            on_complete: None,
        }
    }

    /// Set the animation length.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the start delay.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the easing curve.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the easing curve by family and direction name.
    pub fn with_easing_names(
        self,
        family: &str,
        direction: &str,
    ) -> Result<Self, OrbisError> {
        Ok(self.with_easing(Easing::from_names(family, direction)?))
    }

    /// Force spherical (`true`) or linear (`false`) interpolation.
    #[must_use]
    pub fn with_spherical(mut self, spherical: bool) -> Self {
        self.use_spherical = Some(spherical);
        self
    }

    /// Called after every step, including the final one.
    #[must_use]
    pub fn on_update(mut self, f: impl FnMut(&TransitionFrame) + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    /// Called once when the transition reaches its target. Never called for
    /// cancelled transitions.
    #[must_use]
    pub fn on_complete(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TransitionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionOptions")
            .field("duration", &self.duration)
            .field("delay", &self.delay)
            .field("easing", &self.easing)
            .field("use_spherical", &self.use_spherical)
            .field("on_update", &self.on_update.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// Lifecycle of a transition session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStatus {
    /// Created but not started.
    Pending,
    /// Advancing on every tick.
    Running,
    /// Reached its target and fired completion.
    Completed,
    /// Stopped or replaced before completion.
    Cancelled,
}

/// Caller-side control over a transition session.
#[derive(Debug, Clone)]
pub struct TransitionHandle {
    status: Rc<Cell<TransitionStatus>>,
}

impl TransitionHandle {
    /// Begin a session created with `start_immediately == false`. Returns
    /// whether the session was pending.
    pub fn start(&self) -> bool {
        if self.status.get() == TransitionStatus::Pending {
            self.status.set(TransitionStatus::Running);
            true
        } else {
            false
        }
    }

    /// Cancel the session. No completion callback fires and the
    /// controller's input flag is left as is. Returns whether the session
    /// was still active.
    pub fn stop(&self) -> bool {
        if self.is_active() {
            self.status.set(TransitionStatus::Cancelled);
            true
        } else {
            false
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn status(&self) -> TransitionStatus {
        self.status.get()
    }

    /// Whether the session is pending or running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(
            self.status.get(),
            TransitionStatus::Pending | TransitionStatus::Running
        )
    }
}

/// Interpolated camera pose delivered to `on_update`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionFrame {
    /// Linear time progress in [0, 1].
    pub progress: f32,
    /// Progress after easing.
    pub eased: f32,
    /// Eye position.
    pub position: Vec3,
    /// Orbit target.
    pub target: Vec3,
    /// Eye offset from target, for spherical transitions.
    pub coords: Option<SphericalCoords>,
}

/// The controller's user-input flag, saved when a session begins.
///
/// [`capture`](Self::capture) disables input; [`restore`](Self::restore)
/// writes the saved value back on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputGuard {
    saved: bool,
}

impl InputGuard {
    /// Save `enabled` and clear it.
    pub fn capture(enabled: &mut bool) -> Self {
        let saved = std::mem::replace(enabled, false);
        Self { saved }
    }

    /// Write the saved value back.
    pub fn restore(self, enabled: &mut bool) {
        *enabled = self.saved;
    }

    /// The value captured at session start.
    #[must_use]
    pub fn saved(&self) -> bool {
        self.saved
    }
}

/// Interpolation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionMode {
    /// Independent lerp of eye and target.
    Linear,
    /// Radius/polar/azimuth interpolation around a moving target.
    Spherical,
}

#[derive(Debug, Clone, Copy)]
enum TransitionPath {
    Linear {
        from_position: Vec3,
        to_position: Vec3,
        from_target: Vec3,
        to_target: Vec3,
    },
    Spherical {
        from_target: Vec3,
        to_target: Vec3,
        from: SphericalCoords,
        to: SphericalCoords,
        /// Signed shortest-arc azimuth sweep.
        sweep: f32,
    },
}

impl TransitionPath {
    fn new(eye: Vec3, target: Vec3, to: CameraState) -> Self {
        match to {
            CameraState::Cartesian {
                position,
                target: to_target,
            } => Self::Linear {
                from_position: eye,
                to_position: position,
                from_target: target,
                to_target,
            },
            CameraState::Spherical {
                target: to_target,
                coords,
            } => {
                let from = SphericalCoords::from_offset(eye - target);
                Self::Spherical {
                    from_target: target,
                    to_target,
                    from,
                    to: coords,
                    sweep: shortest_azimuth_delta(from.azimuth, coords.azimuth),
                }
            }
        }
    }

    fn mode(&self) -> TransitionMode {
        match self {
            Self::Linear { .. } => TransitionMode::Linear,
            Self::Spherical { .. } => TransitionMode::Spherical,
        }
    }

    fn sample(&self, progress: f32, eased: f32) -> TransitionFrame {
        match *self {
            Self::Linear {
                from_position,
                to_position,
                from_target,
                to_target,
            } => TransitionFrame {
                progress,
                eased,
                position: from_position.lerp(to_position, eased),
                target: from_target.lerp(to_target, eased),
                coords: None,
            },
            Self::Spherical {
                from_target,
                to_target,
                from,
                to,
                sweep,
            } => {
                let target = from_target.lerp(to_target, eased);
                let coords = SphericalCoords {
                    radius: lerp(from.radius, to.radius, eased).max(0.0),
                    polar: lerp(from.polar, to.polar, eased),
                    azimuth: normalize_azimuth(from.azimuth + sweep * eased),
                };
                TransitionFrame {
                    progress,
                    eased,
                    position: target + coords.to_offset(),
                    target,
                    coords: Some(coords),
                }
            }
        }
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Result of advancing a session by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Step {
    /// Not started, or still inside the delay.
    Waiting,
    /// Intermediate pose.
    Frame(TransitionFrame),
    /// Final pose; the session must be completed.
    Finished(TransitionFrame),
    /// Stopped through its handle.
    Cancelled,
}

/// Live state of one camera animation.
pub struct TransitionSession {
    path: TransitionPath,
    easing: Easing,
    duration: Duration,
    delay: Duration,
    elapsed: Duration,
    progress: f32,
    input: InputGuard,
    status: Rc<Cell<TransitionStatus>>,
    on_update: Option<UpdateCallback>,
    on_complete: Option<CompleteCallback>,
}

impl TransitionSession {
    /// Session from the current pose (`eye`, `target`) toward `to`.
    pub(crate) fn new(
        eye: Vec3,
        target: Vec3,
        to: CameraState,
        options: TransitionOptions,
        input: InputGuard,
        start_immediately: bool,
    ) -> Self {
        let status = if start_immediately {
            TransitionStatus::Running
        } else {
            TransitionStatus::Pending
        };
        Self {
            path: TransitionPath::new(eye, target, to),
            easing: options.easing,
            duration: options.duration,
            delay: options.delay,
            elapsed: Duration::ZERO,
            progress: 0.0,
            input,
            status: Rc::new(Cell::new(status)),
            on_update: options.on_update,
            on_complete: options.on_complete,
        }
    }

    /// A new handle sharing this session's status.
    #[must_use]
    pub fn handle(&self) -> TransitionHandle {
        TransitionHandle {
            status: Rc::clone(&self.status),
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn status(&self) -> TransitionStatus {
        self.status.get()
    }

    /// Linear time progress of the last step.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Interpolation mode.
    #[must_use]
    pub fn mode(&self) -> TransitionMode {
        self.path.mode()
    }

    /// Input flag captured when the session began.
    #[must_use]
    pub fn saved_input_enabled(&self) -> bool {
        self.input.saved()
    }

    /// Advance by `dt`.
    pub(crate) fn step(&mut self, dt: Duration) -> Step {
        match self.status.get() {
            TransitionStatus::Pending => return Step::Waiting,
            TransitionStatus::Cancelled | TransitionStatus::Completed => {
                return Step::Cancelled;
            }
            TransitionStatus::Running => {}
        }

        self.elapsed += dt;
        let Some(active) = self.elapsed.checked_sub(self.delay) else {
            return Step::Waiting;
        };

        self.progress = if self.duration.is_zero() {
            1.0
        } else {
            (active.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };

        if self.progress >= 1.0 {
            Step::Finished(self.path.sample(1.0, 1.0))
        } else {
            let eased = self.easing.evaluate(self.progress);
            Step::Frame(self.path.sample(self.progress, eased))
        }
    }

    pub(crate) fn notify_update(&mut self, frame: &TransitionFrame) {
        if let Some(on_update) = self.on_update.as_mut() {
            on_update(frame);
        }
    }

    /// Restore the input flag, then fire completion.
    pub(crate) fn complete(mut self, enabled: &mut bool) {
        self.status.set(TransitionStatus::Completed);
        self.input.restore(enabled);
        if let Some(on_complete) = self.on_complete.take() {
            on_complete();
        }
    }

    /// Mark cancelled and drop without completing.
    pub(crate) fn cancel(self) {
        if self.handle().is_active() {
            self.status.set(TransitionStatus::Cancelled);
        }
    }
}

impl fmt::Debug for TransitionSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionSession")
            .field("mode", &self.path.mode())
            .field("status", &self.status.get())
            .field("easing", &self.easing)
            .field("duration", &self.duration)
            .field("delay", &self.delay)
            .field("progress", &self.progress)
            .field("saved_input_enabled", &self.input.saved())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{PI, TAU};

    use super::*;
    use crate::util::easing::{EasingDirection, EasingFamily};

    const EPSILON: f32 = 1e-4;

    fn linear_options(ms: u64) -> TransitionOptions {
        TransitionOptions::new()
            .with_duration(Duration::from_millis(ms))
            .with_easing(Easing::LINEAR)
    }

    fn spherical_session(from_az: f32, to_az: f32) -> TransitionSession {
        let eye = SphericalCoords::new(10.0, PI / 2.0, from_az).to_offset();
        let to = CameraState::Spherical {
            target: Vec3::ZERO,
            coords: SphericalCoords::new(10.0, PI / 2.0, to_az),
        };
        let mut enabled = true;
        TransitionSession::new(
            eye,
            Vec3::ZERO,
            to,
            linear_options(1000),
            InputGuard::capture(&mut enabled),
            true,
        )
    }

    fn frame_of(step: Step) -> TransitionFrame {
        match step {
            Step::Frame(f) | Step::Finished(f) => f,
            other => panic!("expected a frame, got {other:?}"),
        }
    }

    #[test]
    fn test_input_guard_pair() {
        let mut enabled = true;
        let guard = InputGuard::capture(&mut enabled);
        assert!(!enabled);
        assert!(guard.saved());
        guard.restore(&mut enabled);
        assert!(enabled);

        let mut disabled = false;
        let guard = InputGuard::capture(&mut disabled);
        disabled = true;
        assert!(disabled);
        guard.restore(&mut disabled);
        assert!(!disabled);
    }

    #[test]
    fn test_linear_midpoint() {
        let mut enabled = true;
        let to = CameraState::Cartesian {
            position: Vec3::new(10.0, 0.0, 0.0),
            target: Vec3::new(0.0, 2.0, 0.0),
        };
        let mut session = TransitionSession::new(
            Vec3::ZERO,
            Vec3::ZERO,
            to,
            linear_options(1000),
            InputGuard::capture(&mut enabled),
            true,
        );
        let frame = frame_of(session.step(Duration::from_millis(500)));
        assert!((frame.position - Vec3::new(5.0, 0.0, 0.0)).length() < EPSILON);
        assert!((frame.target - Vec3::new(0.0, 1.0, 0.0)).length() < EPSILON);
        assert!(frame.coords.is_none());
        assert_eq!(session.mode(), TransitionMode::Linear);
    }

    #[test]
    fn test_spherical_takes_short_way_across_seam() {
        let mut session = spherical_session(3.0, -3.0);
        let sweep = 2.0 * PI - 6.0;
        for ms in (100..=1000).step_by(100) {
            let frame = frame_of(session.step(Duration::from_millis(100)));
            let az = frame.coords.unwrap().azimuth;
            // stays near the ±π seam, never swings through 0
            assert!(az.abs() > 2.9, "at {ms}ms azimuth {az}");
            let travelled = shortest_azimuth_delta(3.0, az).abs();
            assert!(travelled <= sweep + EPSILON);
        }
        assert!((session.progress() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_spherical_path_stays_on_short_arc() {
        let steps = 24;
        let azimuth_at = |i: i32| normalize_azimuth(-PI + TAU * i as f32 / steps as f32);
        for i in 0..steps {
            for j in 0..steps {
                let (from, to) = (azimuth_at(i), azimuth_at(j));
                let eye = SphericalCoords::new(10.0, PI / 2.0, from).to_offset();
                let path = TransitionPath::new(
                    eye,
                    Vec3::ZERO,
                    CameraState::Spherical {
                        target: Vec3::ZERO,
                        coords: SphericalCoords::new(10.0, PI / 2.0, to),
                    },
                );
                let arc = shortest_azimuth_delta(from, to).abs();
                for k in 0..=10 {
                    let t = k as f32 / 10.0;
                    let az = path.sample(t, t).coords.unwrap().azimuth;
                    let travelled = shortest_azimuth_delta(from, az).abs();
                    assert!(travelled <= arc + 1e-3, "{from} -> {to} at {t}: {az}");
                    assert!(
                        (travelled - arc * t).abs() < 1e-3,
                        "{from} -> {to} at {t}: travelled {travelled} of {arc}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_spherical_final_pose() {
        let mut session = spherical_session(0.5, -2.0);
        let frame = frame_of(session.step(Duration::from_secs(2)));
        assert!(matches!(session.step(Duration::ZERO), Step::Finished(_)));
        let coords = frame.coords.unwrap();
        assert!((coords.azimuth + 2.0).abs() < EPSILON);
        let expected = SphericalCoords::new(10.0, PI / 2.0, -2.0).to_offset();
        assert!((frame.position - expected).length() < 1e-3);
    }

    #[test]
    fn test_delay_holds_first_step() {
        let mut enabled = true;
        let options = linear_options(100).with_delay(Duration::from_millis(50));
        let mut session = TransitionSession::new(
            Vec3::ZERO,
            Vec3::ZERO,
            CameraState::Cartesian {
                position: Vec3::X,
                target: Vec3::ZERO,
            },
            options,
            InputGuard::capture(&mut enabled),
            true,
        );
        assert_eq!(session.step(Duration::from_millis(30)), Step::Waiting);
        let frame = frame_of(session.step(Duration::from_millis(70)));
        assert!((frame.progress - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_pending_until_started() {
        let mut enabled = true;
        let mut session = TransitionSession::new(
            Vec3::ZERO,
            Vec3::ZERO,
            CameraState::Cartesian {
                position: Vec3::X,
                target: Vec3::ZERO,
            },
            linear_options(100),
            InputGuard::capture(&mut enabled),
            false,
        );
        let handle = session.handle();
        assert_eq!(session.step(Duration::from_millis(500)), Step::Waiting);
        assert!(handle.start());
        assert!(!handle.start());
        let frame = frame_of(session.step(Duration::from_millis(50)));
        assert!((frame.progress - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_stopped_session_reports_cancelled() {
        let mut session = spherical_session(0.0, 1.0);
        let handle = session.handle();
        assert!(handle.stop());
        assert!(!handle.stop());
        assert_eq!(session.step(Duration::from_millis(10)), Step::Cancelled);
        assert_eq!(handle.status(), TransitionStatus::Cancelled);
    }

    #[test]
    fn test_eased_progress_uses_curve() {
        let mut enabled = true;
        let options = TransitionOptions::new()
            .with_duration(Duration::from_millis(1000))
            .with_easing(Easing::new(EasingFamily::Quadratic, EasingDirection::In));
        let mut session = TransitionSession::new(
            Vec3::ZERO,
            Vec3::ZERO,
            CameraState::Cartesian {
                position: Vec3::X * 4.0,
                target: Vec3::ZERO,
            },
            options,
            InputGuard::capture(&mut enabled),
            true,
        );
        let frame = frame_of(session.step(Duration::from_millis(500)));
        assert!((frame.eased - 0.25).abs() < EPSILON);
        assert!((frame.position.x - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_complete_restores_input_and_fires_once() {
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        let mut enabled = true;
        let options = linear_options(0).on_complete(move || counter.set(counter.get() + 1));
        let mut session = TransitionSession::new(
            Vec3::ZERO,
            Vec3::ZERO,
            CameraState::Cartesian {
                position: Vec3::X,
                target: Vec3::ZERO,
            },
            options,
            InputGuard::capture(&mut enabled),
            true,
        );
        assert!(!enabled);
        let handle = session.handle();
        assert!(matches!(session.step(Duration::ZERO), Step::Finished(_)));
        session.complete(&mut enabled);
        assert!(enabled);
        assert_eq!(fired.get(), 1);
        assert_eq!(handle.status(), TransitionStatus::Completed);
        assert!(!handle.stop());
    }

    #[test]
    fn test_options_reject_unknown_easing_names() {
        assert!(TransitionOptions::new().with_easing_names("Cubic", "Up").is_err());
        let options = TransitionOptions::new()
            .with_easing_names("bounce", "in")
            .unwrap();
        assert_eq!(options.easing.family, EasingFamily::Bounce);
    }
}
