use thiserror::Error;

/// Errors originating from the grid, the engines, and image export.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid grid dimensions: {width}×{height} (both must be > 0)")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("invalid step count: {0} (must be >= 0)")]
    InvalidStepCount(i64),

    #[error("point ({x0}, {x1}) maps outside the {width}×{height} grid")]
    OutOfBounds {
        x0: f64,
        x1: f64,
        width: u32,
        height: u32,
    },

    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] chaosgame_core::CoreError),
}
