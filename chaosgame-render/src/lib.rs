pub mod canvas;
pub mod chaos;
pub mod error;
pub mod export;
pub mod mandelbrot;

pub use canvas::PixelGrid;
pub use chaos::{validate_steps, ChaosEngine, ObserverId, RunObserver, RunSummary};
pub use error::RenderError;
pub use export::{export_png, to_grayscale, ExportMetadata, GrayscaleMode};
pub use mandelbrot::MandelbrotEngine;

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
