use criterion::{criterion_group, criterion_main, Criterion};

use chaosgame_core::FractalDescription;
use chaosgame_render::{to_grayscale, ChaosEngine, GrayscaleMode, MandelbrotEngine};

fn bench_sierpinski_run(c: &mut Criterion) {
    let mut engine =
        ChaosEngine::with_seed(FractalDescription::sierpinski(), 640, 480, 1).unwrap();

    c.bench_function("sierpinski_100k_steps", |b| {
        b.iter(|| engine.run(100_000).unwrap());
    });
}

fn bench_julia_run(c: &mut Criterion) {
    let mut engine = ChaosEngine::with_seed(FractalDescription::julia(), 640, 400, 1).unwrap();

    c.bench_function("julia_100k_steps", |b| {
        b.iter(|| engine.run(100_000).unwrap());
    });
}

fn bench_mandelbrot_render(c: &mut Criterion) {
    let mut engine = MandelbrotEngine::new(640, 480).unwrap();

    c.bench_function("mandelbrot_640x480", |b| {
        b.iter(|| engine.render().unwrap());
    });
}

fn bench_grayscale(c: &mut Criterion) {
    let mut engine = MandelbrotEngine::new(640, 480).unwrap();
    engine.render().unwrap();

    c.bench_function("grayscale_640x480", |b| {
        b.iter(|| to_grayscale(engine.canvas(), GrayscaleMode::Normalized));
    });
}

criterion_group!(
    benches,
    bench_sierpinski_run,
    bench_julia_run,
    bench_mandelbrot_render,
    bench_grayscale
);
criterion_main!(benches);
