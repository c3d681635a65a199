use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;
use orbis::camera::{OrbitController, TransitionOptions, ViewState};
use orbis::options::CameraOptions;
use orbis::util::easing::{Easing, EasingDirection, EasingFamily};

fn easing_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("easing");
    for family in [EasingFamily::Cubic, EasingFamily::Elastic, EasingFamily::Bounce] {
        let easing = Easing::new(family, EasingDirection::InOut);
        group.bench_function(family.name(), |b| {
            b.iter(|| black_box(easing.evaluate(black_box(0.37))));
        });
    }
    group.finish();
}

fn transition_tick_benchmark(c: &mut Criterion) {
    let options = CameraOptions::default();
    let views = [
        ("linear", ViewState::cartesian(Vec3::new(30.0, 20.0, 30.0), Vec3::ZERO)),
        ("spherical", ViewState::spherical(Vec3::ZERO, 60.0, 1.0, -3.0)),
    ];

    let mut group = c.benchmark_group("transition_tick");
    for (name, view) in views {
        group.bench_function(name, |b| {
            b.iter_batched(
                || {
                    let mut controller = OrbitController::new(&options, 1.0);
                    let transition = TransitionOptions::new()
                        .with_duration(Duration::from_secs(3600));
                    let _ = controller.set_view_state(&view, transition);
                    controller
                },
                |mut controller| {
                    for _ in 0..100 {
                        black_box(controller.tick(Duration::from_millis(16)));
                    }
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, easing_benchmark, transition_tick_benchmark);
criterion_main!(benches);
