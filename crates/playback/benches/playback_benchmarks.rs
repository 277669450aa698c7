//! Benchmarks for the animation frame loop.

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kinematics::MotionKind;
use playback::{AnimationConfig, AnimationDescription, Simulator, Visualizer, normalize};
use raster::{PixelCanvas, RecordingSurface};
use serde_json::json;

fn loaded(kind: MotionKind) -> Visualizer<RecordingSurface> {
    let mut vis =
        Visualizer::new(RecordingSurface::new(800, 600), AnimationConfig::default()).unwrap();
    vis.load(AnimationDescription::new(kind)).unwrap();
    vis
}

fn benchmark_full_runs(c: &mut Criterion) {
    for kind in MotionKind::ALL {
        c.bench_function(&format!("run to end {kind}"), |b| {
            b.iter_batched(
                || loaded(kind),
                |vis| {
                    let mut sim = Simulator::new(vis);
                    sim.visualizer_mut().play();
                    black_box(sim.run_until_idle(100_000))
                },
                BatchSize::SmallInput,
            );
        });
    }
}

fn benchmark_pixel_frames(c: &mut Criterion) {
    let canvas = PixelCanvas::new(800, 600).unwrap();
    let mut vis = Visualizer::new(canvas, AnimationConfig::default().with_forces(true)).unwrap();
    vis.load(AnimationDescription::new(MotionKind::UniformCircular))
        .unwrap();

    c.bench_function("pixel canvas step", |b| {
        b.iter(|| {
            vis.step().unwrap();
        });
    });

    c.bench_function("pixel canvas export", |b| {
        b.iter(|| black_box(vis.export_frame().unwrap()));
    });
}

fn benchmark_seek(c: &mut Criterion) {
    let mut vis = loaded(MotionKind::UniformCircular);
    c.bench_function("seek with trail rebuild", |b| {
        b.iter(|| vis.seek(black_box(7.5)).unwrap());
    });
}

fn benchmark_normalize(c: &mut Criterion) {
    let legacy = json!({
        "type": "projectile",
        "initial_speed": 16,
        "angle": 50,
        "gravity": 9.8,
        "scale": 20
    });
    c.bench_function("normalize legacy", |b| {
        b.iter(|| black_box(normalize(black_box(&legacy))));
    });
}

criterion_group!(
    benches,
    benchmark_full_runs,
    benchmark_pixel_frames,
    benchmark_seek,
    benchmark_normalize,
);
criterion_main!(benches);
