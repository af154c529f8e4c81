use std::time::Instant;

use tracing::info;

use chaosgame_core::{escape_time, ComplexNumber, CoreError, Vector2, DEFAULT_MAX_ITERATIONS};

use crate::canvas::PixelGrid;

/// Half-width of the fixed square region `[-2, 2] × [-2, 2]`.
const EXTENT: f64 = 2.0;

/// Escape-time renderer for the Mandelbrot set over `[-2, 2]²`.
///
/// Every cell receives the escape-time count of its pixel, from `1` up to
/// the iteration cap (points that never escape).
#[derive(Debug, Clone)]
pub struct MandelbrotEngine {
    grid: PixelGrid,
    max_iterations: u32,
}

impl MandelbrotEngine {
    pub fn new(width: u32, height: u32) -> crate::Result<Self> {
        let min = Vector2::new(-EXTENT, -EXTENT)?;
        let max = Vector2::new(EXTENT, EXTENT)?;
        Ok(Self {
            grid: PixelGrid::new(min, max, width, height)?,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        })
    }

    /// Return a copy with a different iteration cap.
    pub fn with_max_iterations(self, max_iterations: u32) -> crate::Result<Self> {
        if max_iterations < 1 {
            return Err(CoreError::InvalidMaxIterations(max_iterations).into());
        }
        Ok(Self {
            max_iterations,
            ..self
        })
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Point on the complex plane for column `x`, row `y`.
    ///
    /// Column 0 is `re = -2`, the last column `re = 2`; row 0 is `im = 2`,
    /// the last row `im = -2`.
    pub fn pixel_to_complex(&self, x: u32, y: u32) -> crate::Result<ComplexNumber> {
        let re = lerp(-EXTENT, EXTENT, x, self.grid.width());
        let im = lerp(EXTENT, -EXTENT, y, self.grid.height());
        Ok(ComplexNumber::new(re, im)?)
    }

    /// Fill every cell with its escape-time count.
    pub fn render(&mut self) -> crate::Result<()> {
        let start = Instant::now();
        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                let c = self.pixel_to_complex(x, y)?;
                self.grid.set(x, y, escape_time(c, self.max_iterations));
            }
        }
        info!(
            "Mandelbrot {}×{} rendered in {:.1?}",
            self.grid.width(),
            self.grid.height(),
            start.elapsed()
        );
        Ok(())
    }

    pub fn canvas(&self) -> &PixelGrid {
        &self.grid
    }
}

/// Linear interpolation from `from` (index 0) to `to` (index `count - 1`).
#[inline]
fn lerp(from: f64, to: f64, index: u32, count: u32) -> f64 {
    if count <= 1 {
        return from;
    }
    from + (to - from) * index as f64 / (count - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            MandelbrotEngine::new(0, 5),
            Err(RenderError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn zero_iteration_cap_is_rejected() {
        let engine = MandelbrotEngine::new(4, 4).unwrap();
        assert!(matches!(
            engine.with_max_iterations(0),
            Err(RenderError::Core(CoreError::InvalidMaxIterations(0)))
        ));
    }

    #[test]
    fn corners_span_the_domain() {
        let engine = MandelbrotEngine::new(5, 5).unwrap();
        let tl = engine.pixel_to_complex(0, 0).unwrap();
        let br = engine.pixel_to_complex(4, 4).unwrap();
        assert_eq!((tl.re(), tl.im()), (-2.0, 2.0));
        assert_eq!((br.re(), br.im()), (2.0, -2.0));
        let centre = engine.pixel_to_complex(2, 2).unwrap();
        assert_eq!((centre.re(), centre.im()), (0.0, 0.0));
    }

    #[test]
    fn centre_pixel_hits_the_cap() {
        let mut engine = MandelbrotEngine::new(5, 5).unwrap();
        engine.render().unwrap();
        assert_eq!(engine.canvas().cell(2, 2), Some(DEFAULT_MAX_ITERATIONS));
        // (2, 2) escapes on the first step.
        assert_eq!(engine.canvas().cell(4, 0), Some(1));
    }

    #[test]
    fn counts_never_exceed_the_cap() {
        let mut engine = MandelbrotEngine::new(32, 24)
            .unwrap()
            .with_max_iterations(16)
            .unwrap();
        engine.render().unwrap();
        let cells = engine.canvas().cells();
        assert!(cells.iter().all(|&n| (1..=16).contains(&n)));
        assert!(cells.iter().any(|&n| n == 16));
        assert!(cells.iter().any(|&n| n < 16));
    }
}
