//! PNG export of a [`PixelGrid`] with embedded metadata (tEXt chunks).

use std::io::BufWriter;
use std::path::Path;

use tracing::debug;

use crate::canvas::PixelGrid;

/// How cell counts become 8-bit gray levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrayscaleMode {
    /// Any cell hit at least once is white, the rest black.
    HitMask,
    /// Counts scaled linearly so the busiest cell is white.
    Normalized,
}

/// Metadata to embed in an exported PNG as tEXt chunks.
pub struct ExportMetadata {
    pub fractal_type: String,
    /// Chaos-game steps, for attractor renders.
    pub steps: Option<u64>,
    /// Iteration cap, for escape-time renders.
    pub max_iterations: Option<u32>,
}

/// One gray byte per cell, row-major, top row first.
pub fn to_grayscale(grid: &PixelGrid, mode: GrayscaleMode) -> Vec<u8> {
    match mode {
        GrayscaleMode::HitMask => grid
            .cells()
            .iter()
            .map(|&c| if c > 0 { u8::MAX } else { 0 })
            .collect(),
        GrayscaleMode::Normalized => {
            let max = grid.max_count();
            if max == 0 {
                return vec![0; grid.cells().len()];
            }
            let scale = u8::MAX as f64 / max as f64;
            grid.cells()
                .iter()
                .map(|&c| (c as f64 * scale).round() as u8)
                .collect()
        }
    }
}

/// Write a grid as an 8-bit grayscale PNG with embedded fractal metadata.
pub fn export_png(
    grid: &PixelGrid,
    path: &Path,
    mode: GrayscaleMode,
    metadata: &ExportMetadata,
) -> crate::Result<()> {
    let file = std::fs::File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, grid.width(), grid.height());
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    encoder.add_text_chunk("Software".to_string(), "ChaosGame".to_string())?;
    for (key, value) in build_metadata_pairs(grid, metadata) {
        encoder.add_text_chunk(key, value)?;
    }

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&to_grayscale(grid, mode))?;

    debug!(
        "Exported PNG {}x{} to {}",
        grid.width(),
        grid.height(),
        path.display()
    );
    Ok(())
}

fn build_metadata_pairs(grid: &PixelGrid, meta: &ExportMetadata) -> Vec<(String, String)> {
    let mut pairs = vec![
        ("ChaosGame.FractalType".into(), meta.fractal_type.clone()),
        (
            "ChaosGame.Resolution".into(),
            format!("{}x{}", grid.width(), grid.height()),
        ),
    ];
    if let Some(steps) = meta.steps {
        pairs.push(("ChaosGame.Steps".into(), steps.to_string()));
    }
    if let Some(max_iterations) = meta.max_iterations {
        pairs.push(("ChaosGame.MaxIterations".into(), max_iterations.to_string()));
    }
    pairs
}
