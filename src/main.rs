use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Duration;

use glam::Vec3;
use orbis::camera::core::Camera;
use orbis::camera::ViewState;
use orbis::events::signal::{Signal, TRANSITION_COMPLETE};
use orbis::events::EventBus;
use orbis::game::{FrameRenderer, Game, LogDiagnostics};
use orbis::options::Options;

/// Host ticks per second; the game divides these down to its frame rate.
const TICK: Duration = Duration::from_nanos(1_000_000_000 / 60);
/// Stop the tour if it has not finished after this many ticks.
const MAX_TICKS: u32 = 60 * 60;

/// Renderer that logs where the camera is instead of drawing.
struct LogRenderer {
    frames: u64,
}

impl FrameRenderer for LogRenderer {
    fn render(&mut self, camera: &Camera) {
        self.frames += 1;
        log::debug!(
            "frame {}: eye={} target={}",
            self.frames,
            camera.eye,
            camera.target
        );
    }

    fn resize(&mut self, width: u32, height: u32) {
        log::info!("renderer resized to {width}x{height}");
    }
}

fn tour() -> VecDeque<ViewState> {
    VecDeque::from([
        ViewState::spherical(Vec3::ZERO, 80.0, 1.2, 3.0),
        // crosses the azimuth seam the short way
        ViewState::spherical(Vec3::ZERO, 80.0, 1.2, -3.0),
        ViewState::cartesian(Vec3::new(30.0, 20.0, 30.0), Vec3::new(0.0, 5.0, 0.0)),
        ViewState::spherical(Vec3::new(10.0, 0.0, 0.0), 40.0, 0.4, 1.5),
    ])
}

fn load_options() -> Options {
    let Some(path) = std::env::args().nth(1).map(PathBuf::from) else {
        return Options::default();
    };
    match Options::load(&path) {
        Ok(options) => options,
        Err(e) => {
            log::error!("Failed to load '{}': {e}", path.display());
            std::process::exit(1);
        }
    }
}

fn main() {
    env_logger::init();

    let options = load_options();
    let defaults = options.transition.clone();
    let mut game = Game::new(options).with_diagnostics(Box::new(LogDiagnostics));
    let mut renderer = LogRenderer { frames: 0 };

    let _sub = game.events().on(
        TRANSITION_COMPLETE,
        |_: &EventBus<Signal>, signal: &Signal| {
            if let Signal::TransitionComplete { view } = signal {
                match view.to_json() {
                    Ok(json) => log::info!("arrived at {json}"),
                    Err(e) => log::warn!("arrived, snapshot failed: {e}"),
                }
            }
        },
    );

    let (width, height) = game.size();
    game.resize(width, height, &mut renderer);

    let mut stops = tour();
    for _ in 0..MAX_TICKS {
        if !game.controller().is_transitioning() {
            let Some(next) = stops.pop_front() else {
                break;
            };
            let started = defaults
                .to_options()
                .and_then(|opts| game.controller_mut().set_view_state(&next, opts));
            if let Err(e) = started {
                log::error!("Cannot start transition: {e}");
                std::process::exit(1);
            }
        }
        let _ = game.tick(TICK, &mut renderer);
    }

    log::info!(
        "Tour finished after {} frames, {} stops left",
        game.frame_count(),
        stops.len()
    );
}
