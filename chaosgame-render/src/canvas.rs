use chaosgame_core::{AffineTransform, Matrix2, Vector2};

use crate::error::RenderError;

/// Per-cell hit counts for a rectangular region of the plane.
///
/// Cells are stored row-major, `height` rows of `width` columns. Row 0 is
/// the top of the region (largest `x1`) and column 0 its left edge
/// (smallest `x0`).
///
/// A plane point is located through a fixed affine map derived from the
/// bounds. Its matrix is anti-diagonal: the first mapped component depends
/// only on the plane's `x1` and gives the row, the second depends only on
/// `x0` and gives the column.
#[derive(Debug, Clone)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    cells: Vec<u32>,
    coordinate_map: AffineTransform,
}

impl PixelGrid {
    /// Create a zeroed grid covering `[min, max]`.
    ///
    /// `min` lands on the bottom-left cell and `max` on the top-right one.
    /// Degenerate bounds (`min == max` on an axis) produce a non-finite map
    /// and are rejected as invalid numbers.
    pub fn new(min: Vector2, max: Vector2, width: u32, height: u32) -> crate::Result<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }

        let rows = (height - 1) as f64;
        let cols = (width - 1) as f64;
        let matrix = Matrix2::new(
            0.0,
            rows / (min.x1() - max.x1()),
            cols / (max.x0() - min.x0()),
            0.0,
        )?;
        let offset = Vector2::new(
            rows * max.x1() / (max.x1() - min.x1()),
            cols * min.x0() / (min.x0() - max.x0()),
        )?;

        Ok(Self {
            width,
            height,
            cells: vec![0; width as usize * height as usize],
            coordinate_map: AffineTransform::new(matrix, offset),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The plane → `(row, column)` map, before rounding.
    pub fn coordinate_map(&self) -> &AffineTransform {
        &self.coordinate_map
    }

    /// Row-major cell counts.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Locate the `(row, column)` cell that `point` falls in.
    pub fn indices_of(&self, point: Vector2) -> crate::Result<(usize, usize)> {
        let mapped = self.coordinate_map.apply(point);
        let row = mapped.x0().round();
        let col = mapped.x1().round();

        // NaN fails every comparison, so it falls through to the error too.
        if (0.0..self.height as f64).contains(&row) && (0.0..self.width as f64).contains(&col) {
            Ok((row as usize, col as usize))
        } else {
            Err(RenderError::OutOfBounds {
                x0: point.x0(),
                x1: point.x1(),
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Add one hit to the cell under `point`.
    pub fn increment(&mut self, point: Vector2) -> crate::Result<()> {
        let index = self.flat_index(point)?;
        self.cells[index] = self.cells[index].saturating_add(1);
        Ok(())
    }

    /// Current count of the cell under `point`.
    pub fn get(&self, point: Vector2) -> crate::Result<u32> {
        Ok(self.cells[self.flat_index(point)?])
    }

    /// Overwrite the cell at column `x`, row `y`.
    ///
    /// Callers pass indices they generated from `width()` and `height()`.
    ///
    /// # Panics
    ///
    /// If `x >= width` or `y >= height`.
    pub fn set(&mut self, x: u32, y: u32, value: u32) {
        assert!(x < self.width && y < self.height, "({x}, {y}) outside grid");
        self.cells[y as usize * self.width as usize + x as usize] = value;
    }

    /// Count at column `x`, row `y`, or `None` outside the grid.
    pub fn cell(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.cells[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Reset every cell to zero.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Copy of the counts as one `Vec` per row, top row first.
    pub fn snapshot(&self) -> Vec<Vec<u32>> {
        self.cells
            .chunks_exact(self.width as usize)
            .map(<[u32]>::to_vec)
            .collect()
    }

    /// Largest count in the grid.
    pub fn max_count(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Number of cells hit at least once.
    pub fn hit_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c > 0).count()
    }

    fn flat_index(&self, point: Vector2) -> crate::Result<usize> {
        let (row, col) = self.indices_of(point)?;
        Ok(row * self.width as usize + col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaosgame_core::CoreError;

    fn v(x0: f64, x1: f64) -> Vector2 {
        Vector2::new(x0, x1).unwrap()
    }

    fn unit_grid(width: u32, height: u32) -> PixelGrid {
        PixelGrid::new(v(0.0, 0.0), v(1.0, 1.0), width, height).unwrap()
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            PixelGrid::new(v(0.0, 0.0), v(1.0, 1.0), 0, 10),
            Err(RenderError::InvalidDimensions { width: 0, height: 10 })
        ));
        assert!(matches!(
            PixelGrid::new(v(0.0, 0.0), v(1.0, 1.0), 10, 0),
            Err(RenderError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn degenerate_bounds_are_rejected() {
        assert!(matches!(
            PixelGrid::new(v(0.0, 0.0), v(0.0, 1.0), 10, 10),
            Err(RenderError::Core(CoreError::InvalidNumber { .. }))
        ));
    }

    #[test]
    fn coordinate_map_is_anti_diagonal() {
        let grid = PixelGrid::new(v(-2.0, -1.0), v(2.0, 3.0), 9, 5).unwrap();
        let [a00, a01, a10, a11] = grid.coordinate_map().matrix().coefficients();
        assert_eq!(a00, 0.0);
        assert_eq!(a11, 0.0);
        assert_eq!(a01, 4.0 / -4.0);
        assert_eq!(a10, 8.0 / 4.0);
        let offset = grid.coordinate_map().offset();
        assert_eq!(offset.x0(), 4.0 * 3.0 / 4.0);
        assert_eq!(offset.x1(), 8.0 * -2.0 / -4.0);
    }

    #[test]
    fn corners_map_to_grid_corners() {
        let grid = PixelGrid::new(v(-2.65, 0.0), v(2.65, 10.0), 200, 300).unwrap();
        assert_eq!(grid.indices_of(v(-2.65, 0.0)).unwrap(), (299, 0));
        assert_eq!(grid.indices_of(v(2.65, 10.0)).unwrap(), (0, 199));
        assert_eq!(grid.indices_of(v(-2.65, 10.0)).unwrap(), (0, 0));
        assert_eq!(grid.indices_of(v(2.65, 0.0)).unwrap(), (299, 199));
    }

    #[test]
    fn increment_rounds_to_nearest_cell() {
        let mut grid = unit_grid(11, 11);
        // x0 = 0.34 → column 3.4 → 3; x1 = 0.76 → row 10 − 7.6 = 2.4 → 2
        grid.increment(v(0.34, 0.76)).unwrap();
        grid.increment(v(0.3, 0.8)).unwrap();
        assert_eq!(grid.cell(3, 2), Some(2));
        assert_eq!(grid.get(v(0.3, 0.8)).unwrap(), 2);
        assert_eq!(grid.hit_count(), 1);
    }

    #[test]
    fn points_outside_bounds_fail() {
        let mut grid = unit_grid(10, 10);
        assert!(matches!(
            grid.increment(v(1.2, 0.5)),
            Err(RenderError::OutOfBounds { .. })
        ));
        assert!(grid.increment(v(0.5, -0.2)).is_err());
        assert!(grid.get(v(-1.0, -1.0)).is_err());
        assert_eq!(grid.max_count(), 0);
    }

    #[test]
    fn rounding_within_half_a_cell_stays_inside() {
        let mut grid = unit_grid(11, 11);
        // 10.04 rounds to 10, the last column.
        grid.increment(v(1.004, 0.5)).unwrap();
        assert_eq!(grid.cell(10, 5), Some(1));
    }

    #[test]
    fn clear_zeroes_everything() {
        let mut grid = unit_grid(8, 8);
        grid.increment(v(0.1, 0.1)).unwrap();
        grid.set(7, 7, 42);
        grid.clear();
        assert!(grid.cells().iter().all(|&c| c == 0));
        assert_eq!(grid.get(v(0.1, 0.1)).unwrap(), 0);
        assert_eq!(grid.get(v(1.0, 0.0)).unwrap(), 0);
    }

    #[test]
    fn set_and_snapshot_are_row_major() {
        let mut grid = unit_grid(3, 2);
        grid.set(2, 0, 5);
        grid.set(0, 1, 7);
        assert_eq!(grid.snapshot(), vec![vec![0, 0, 5], vec![7, 0, 0]]);
        assert_eq!(grid.cell(3, 0), None);
    }

    #[test]
    #[should_panic(expected = "outside grid")]
    fn set_past_row_end_panics() {
        // (3, 0) would alias (0, 1) in the flat buffer.
        let mut grid = unit_grid(3, 2);
        grid.set(3, 0, 1);
    }

    #[test]
    fn single_cell_grid_accepts_the_min_corner() {
        let mut grid = unit_grid(1, 1);
        grid.increment(v(0.0, 0.0)).unwrap();
        assert_eq!(grid.cells(), &[1]);
    }
}
