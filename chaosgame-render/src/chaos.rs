use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use chaosgame_core::{FractalDescription, Vector2};

use crate::canvas::PixelGrid;
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Observers
// ---------------------------------------------------------------------------

/// Receives a callback each time [`ChaosEngine::run`] finishes, including
/// runs aborted by an out-of-bounds point.
///
/// Implemented for any `FnMut(&RunSummary, &PixelGrid)` closure.
pub trait RunObserver {
    fn run_finished(&mut self, summary: &RunSummary, canvas: &PixelGrid);
}

impl<F> RunObserver for F
where
    F: FnMut(&RunSummary, &PixelGrid),
{
    fn run_finished(&mut self, summary: &RunSummary, canvas: &PixelGrid) {
        self(summary, canvas)
    }
}

/// Handle returned by [`ChaosEngine::register_observer`].
///
/// Each registration gets its own handle, so registering the same observer
/// twice means it is notified twice and must be removed twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// What a single call to [`ChaosEngine::run`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub steps_requested: u64,
    /// Steps whose point landed on the grid.
    pub steps_completed: u64,
    /// `true` if a point left the grid and the run stopped early.
    pub aborted: bool,
    pub elapsed: Duration,
}

/// Convert a signed step count from user input, rejecting negatives.
pub fn validate_steps(steps: i64) -> crate::Result<u64> {
    u64::try_from(steps).map_err(|_| RenderError::InvalidStepCount(steps))
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Plays the chaos game for one [`FractalDescription`].
///
/// Each step picks one of the description's transforms uniformly at random,
/// applies it to the current point, and counts a hit in the cell the new
/// point lands in. The current point starts at the origin and carries over
/// between runs; only the grid is cleared.
pub struct ChaosEngine {
    description: FractalDescription,
    grid: PixelGrid,
    current_point: Vector2,
    rng: StdRng,
    observers: Vec<(ObserverId, Box<dyn RunObserver>)>,
    next_observer_id: u64,
}

impl ChaosEngine {
    /// Create an engine with a grid of `width × height` cells over the
    /// description's bounds, seeded from OS entropy.
    pub fn new(description: FractalDescription, width: u32, height: u32) -> crate::Result<Self> {
        Self::with_rng(description, width, height, StdRng::from_entropy())
    }

    /// Like [`new`](Self::new) but with a fixed seed, for reproducible runs.
    pub fn with_seed(
        description: FractalDescription,
        width: u32,
        height: u32,
        seed: u64,
    ) -> crate::Result<Self> {
        Self::with_rng(description, width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        description: FractalDescription,
        width: u32,
        height: u32,
        rng: StdRng,
    ) -> crate::Result<Self> {
        let grid = PixelGrid::new(description.min(), description.max(), width, height)?;
        debug!(
            "Chaos engine: {} transforms, {}×{} grid",
            description.transforms().len(),
            width,
            height
        );
        Ok(Self {
            description,
            grid,
            current_point: Vector2::ZERO,
            rng,
            observers: Vec::new(),
            next_observer_id: 0,
        })
    }

    /// Clear the grid and perform `steps` iterations.
    ///
    /// Observers are notified once when the run ends, whether it completed
    /// or stopped at a point outside the grid. In the latter case the
    /// out-of-bounds error is returned after notification; the engine stays
    /// usable.
    pub fn run(&mut self, steps: u64) -> crate::Result<RunSummary> {
        let start = Instant::now();
        self.grid.clear();

        let transforms = self.description.transforms();
        let mut completed = 0;
        let mut failure = None;
        for _ in 0..steps {
            let index = self.rng.gen_range(0..transforms.len());
            self.current_point = transforms[index].apply(self.current_point);
            if let Err(e) = self.grid.increment(self.current_point) {
                failure = Some(e);
                break;
            }
            completed += 1;
        }

        let summary = RunSummary {
            steps_requested: steps,
            steps_completed: completed,
            aborted: failure.is_some(),
            elapsed: start.elapsed(),
        };

        for (_, observer) in &mut self.observers {
            observer.run_finished(&summary, &self.grid);
        }

        match failure {
            Some(e) => {
                warn!("Chaos run aborted after {completed}/{steps} steps: {e}");
                Err(e)
            }
            None => {
                info!(
                    "Chaos run: {} steps, {} cells hit in {:.1?}",
                    steps,
                    self.grid.hit_count(),
                    summary.elapsed
                );
                Ok(summary)
            }
        }
    }

    pub fn register_observer(&mut self, observer: impl RunObserver + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Drop a registration. Returns `false` if `id` was not registered.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(registered, _)| *registered != id);
        self.observers.len() != before
    }

    /// Hit counts from the most recent run.
    pub fn canvas(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn description(&self) -> &FractalDescription {
        &self.description
    }

    pub fn current_point(&self) -> Vector2 {
        self.current_point
    }
}
