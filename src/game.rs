//! Host loop: frame pacing, per-frame events, and rendering hand-off.
//!
//! [`Game`] owns the [`OrbitController`] and an [`EventBus`] of
//! [`Signal`]s. Each rendered tick advances the camera (so a transition's
//! update callback runs before the frame is drawn), emits
//! [`TRANSITION_COMPLETE`] when a transition finished, emits [`UPDATE`],
//! then hands the camera to the [`FrameRenderer`].

use std::time::Duration;

use crate::camera::controller::{OrbitController, TickOutcome};
use crate::camera::core::Camera;
use crate::events::signal::{
    Signal, TRANSITION_COMPLETE, UPDATE, VIEW_SIZE_CHANGED,
};
use crate::events::EventBus;
use crate::options::Options;
use crate::util::clock::Clock;

/// Draws frames for the host loop.
pub trait FrameRenderer {
    /// Draw one frame from `camera`.
    fn render(&mut self, camera: &Camera);

    /// The viewport changed size.
    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// What happened on one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Rendered frames so far, including this one.
    pub frame: u64,
    /// Clamped delta passed to the controller, in seconds.
    pub delta: f32,
    /// Smoothed wall-clock frame rate.
    pub fps: f32,
    /// Controller tick result.
    pub outcome: TickOutcome,
    /// Eye position after the tick.
    pub eye: glam::Vec3,
    /// Orbit target after the tick.
    pub target: glam::Vec3,
}

/// Receives a [`FrameReport`] after every rendered frame.
pub trait Diagnostics {
    /// Inspect one frame.
    fn report(&mut self, report: &FrameReport);
}

/// [`Diagnostics`] that forwards reports to the `log` facade at trace
/// level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&mut self, report: &FrameReport) {
        log::trace!(
            "frame {} dt={:.4}s fps={:.1} {:?} eye={} target={}",
            report.frame,
            report.delta,
            report.fps,
            report.outcome,
            report.eye,
            report.target,
        );
    }
}

/// Frame-rate-divided host loop around an orbit camera.
pub struct Game {
    options: Options,
    controller: OrbitController,
    events: EventBus<Signal>,
    clock: Clock,
    frame_interval: u32,
    pending_ticks: u32,
    accumulated: Duration,
    frames: u64,
    width: u32,
    height: u32,
    diagnostics: Option<Box<dyn Diagnostics>>,
}

impl Game {
    /// Build a loop from options. The camera starts at
    /// `options.camera.position`.
    #[must_use]
    pub fn new(options: Options) -> Self {
        let controller =
            OrbitController::new(&options.camera, options.game.aspect());
        let frame_interval = options.game.frame_interval();
        log::debug!(
            "Game loop at {} fps (every {frame_interval} ticks), {}x{}",
            options.game.frame_rate,
            options.game.width,
            options.game.height,
        );
        Self {
            width: options.game.width,
            height: options.game.height,
            controller,
            events: EventBus::new(),
            clock: Clock::new(),
            frame_interval,
            pending_ticks: 0,
            accumulated: Duration::ZERO,
            frames: 0,
            diagnostics: None,
            options,
        }
    }

    /// Attach a diagnostics sink.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Box<dyn Diagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Loop configuration.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The orbit camera controller.
    #[must_use]
    pub fn controller(&self) -> &OrbitController {
        &self.controller
    }

    /// Mutable access to the controller, for input and transitions.
    pub fn controller_mut(&mut self) -> &mut OrbitController {
        &mut self.controller
    }

    /// The loop's event bus. Clones share registrations.
    #[must_use]
    pub fn events(&self) -> &EventBus<Signal> {
        &self.events
    }

    /// Rendered frames so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Viewport size in pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Smoothed wall-clock frame rate from [`frame`](Self::frame).
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.clock.fps()
    }

    /// Advance the loop by `dt`. Only every `frame_interval`-th call
    /// renders; skipped calls accumulate their time. Returns whether a
    /// frame was rendered.
    pub fn tick(&mut self, dt: Duration, renderer: &mut dyn FrameRenderer) -> bool {
        self.accumulated += dt;
        self.pending_ticks += 1;
        if self.pending_ticks < self.frame_interval {
            return false;
        }
        self.pending_ticks = 0;

        let cap = Duration::try_from_secs_f32(self.options.game.max_delta)
            .unwrap_or(Duration::from_secs(1));
        let delta = std::mem::take(&mut self.accumulated).min(cap);

        let outcome = self.controller.tick(delta);
        if outcome == TickOutcome::Completed {
            let view = self.controller.view_state();
            let _ = self
                .events
                .emit(TRANSITION_COMPLETE, &Signal::TransitionComplete { view });
        }
        let _ = self.events.emit(
            UPDATE,
            &Signal::Update {
                delta: delta.as_secs_f32(),
            },
        );

        renderer.render(self.controller.camera());
        self.frames += 1;

        if let Some(diagnostics) = self.diagnostics.as_mut() {
            let camera = self.controller.camera();
            diagnostics.report(&FrameReport {
                frame: self.frames,
                delta: delta.as_secs_f32(),
                fps: self.clock.fps(),
                outcome,
                eye: camera.eye,
                target: camera.target,
            });
        }
        true
    }

    /// [`tick`](Self::tick) with the wall-clock time since the previous
    /// call.
    pub fn frame(&mut self, renderer: &mut dyn FrameRenderer) -> bool {
        let dt = self.clock.delta();
        self.tick(dt, renderer)
    }

    /// Resize the viewport: update the camera aspect, forward the size to
    /// the renderer, and emit [`VIEW_SIZE_CHANGED`].
    pub fn resize(
        &mut self,
        width: u32,
        height: u32,
        renderer: &mut dyn FrameRenderer,
    ) {
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
        self.controller.set_aspect(width as f32 / height as f32);
        renderer.resize(width, height);
        log::debug!("Viewport resized to {width}x{height}");
        let _ = self
            .events
            .emit(VIEW_SIZE_CHANGED, &Signal::ViewSizeChanged { width, height });
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("controller", &self.controller)
            .field("frame_interval", &self.frame_interval)
            .field("frames", &self.frames)
            .field("size", &(self.width, self.height))
            .finish_non_exhaustive()
    }
}
