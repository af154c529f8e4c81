pub mod codec;
pub mod complex;
pub mod description;
pub mod error;
pub mod mandelbrot;
pub mod matrix;
pub mod transform;
pub mod vector;

// Re-export primary types for convenience.
pub use complex::ComplexNumber;
pub use description::FractalDescription;
pub use error::CoreError;
pub use mandelbrot::{escape_time, DEFAULT_MAX_ITERATIONS};
pub use matrix::Matrix2;
pub use transform::{AffineTransform, JuliaTransform, Sign, Transform, TransformKind};
pub use vector::Vector2;

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
