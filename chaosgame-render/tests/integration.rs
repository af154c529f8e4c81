use std::cell::RefCell;
use std::rc::Rc;

use chaosgame_core::{codec, AffineTransform, FractalDescription, Matrix2, Vector2};
use chaosgame_render::{
    to_grayscale, ChaosEngine, GrayscaleMode, MandelbrotEngine, PixelGrid, RenderError,
    RunSummary,
};

fn v(x0: f64, x1: f64) -> Vector2 {
    Vector2::new(x0, x1).unwrap()
}

#[test]
fn end_to_end_sierpinski_run() {
    let mut engine =
        ChaosEngine::with_seed(FractalDescription::sierpinski(), 128, 128, 2024).unwrap();

    let summary = engine.run(200_000).unwrap();

    assert_eq!(summary.steps_completed, 200_000);
    let grid = engine.canvas();
    assert_eq!(grid.width(), 128);
    assert_eq!(grid.cells().len(), 128 * 128);

    // The fixed points of the outer maps are hit; the centre of the removed
    // middle triangle never is.
    assert!(grid.get(v(0.0, 0.0)).unwrap() > 0);
    assert!(grid.get(v(1.0, 0.0)).unwrap() > 0);
    assert_eq!(grid.get(v(0.5, 0.35)).unwrap(), 0);
    assert!(grid.hit_count() < 128 * 128 / 2);
}

#[test]
fn end_to_end_fern_run() {
    let mut engine =
        ChaosEngine::with_seed(FractalDescription::barnsley_fern(), 200, 200, 11).unwrap();
    let summary = engine.run(50_000).unwrap();
    assert!(!summary.aborted);
    assert!(engine.canvas().hit_count() > 500);
}

#[test]
fn end_to_end_julia_run() {
    let mut engine = ChaosEngine::with_seed(FractalDescription::julia(), 160, 100, 5).unwrap();
    engine.run(20_000).unwrap();

    // Both branches are sampled: the attractor is point-symmetric about 0.
    let left = engine.canvas().get(v(-1.0, 0.0));
    let right = engine.canvas().get(v(1.0, 0.0));
    assert!(left.is_ok() && right.is_ok());
    assert!(engine.canvas().hit_count() > 100);
}

#[test]
fn escaping_attractor_aborts_and_still_notifies() {
    // x → x + (1, 0) walks off the unit square on the second step.
    let shift = AffineTransform::new(Matrix2::IDENTITY, v(1.0, 0.0));
    let description = FractalDescription::new(v(0.0, 0.0), v(1.0, 1.0), vec![shift.into()]).unwrap();
    let mut engine = ChaosEngine::with_seed(description, 10, 10, 1).unwrap();

    let seen: Rc<RefCell<Vec<RunSummary>>> = Rc::default();
    let log = Rc::clone(&seen);
    engine.register_observer(move |summary: &RunSummary, _: &PixelGrid| {
        log.borrow_mut().push(*summary)
    });

    let err = engine.run(10).unwrap_err();
    assert!(matches!(err, RenderError::OutOfBounds { x0, .. } if x0 == 2.0));

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].aborted);
    assert_eq!(seen[0].steps_completed, 1);
    assert_eq!(engine.canvas().max_count(), 1);
    assert_eq!(engine.current_point(), v(2.0, 0.0));
}

#[test]
fn engine_stays_usable_after_abort() {
    let shift = AffineTransform::new(Matrix2::IDENTITY, v(1.0, 0.0));
    let description = FractalDescription::new(v(0.0, 0.0), v(1.0, 1.0), vec![shift.into()]).unwrap();
    let mut engine = ChaosEngine::with_seed(description, 10, 10, 1).unwrap();

    assert!(engine.run(5).is_err());
    let summary = engine.run(0).unwrap();
    assert_eq!(summary.steps_completed, 0);
    assert_eq!(engine.canvas().max_count(), 0);
}

#[test]
fn decoded_description_drives_the_engine() {
    let text = codec::encode(&FractalDescription::sierpinski()).unwrap();
    let description = codec::decode(&text).unwrap();

    let mut a = ChaosEngine::with_seed(description, 64, 64, 77).unwrap();
    let mut b = ChaosEngine::with_seed(FractalDescription::sierpinski(), 64, 64, 77).unwrap();
    a.run(10_000).unwrap();
    b.run(10_000).unwrap();

    assert_eq!(a.canvas().cells(), b.canvas().cells());
}

#[test]
fn mandelbrot_render_has_interior_and_exterior() {
    let mut engine = MandelbrotEngine::new(100, 100).unwrap();
    engine.render().unwrap();

    let cap = engine.max_iterations();
    let cells = engine.canvas().cells();
    assert!(cells.iter().any(|&n| n == cap));
    assert!(cells.iter().any(|&n| n < cap));

    let gray = to_grayscale(engine.canvas(), GrayscaleMode::Normalized);
    assert_eq!(gray.len(), 100 * 100);
    assert!(gray.iter().any(|&g| g == 255));
}
