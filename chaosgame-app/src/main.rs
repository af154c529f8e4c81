mod app_dir;
mod preferences;

use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use chaosgame_core::{codec, FractalDescription};
use chaosgame_render::{
    export_png, validate_steps, ChaosEngine, ExportMetadata, GrayscaleMode, MandelbrotEngine,
    PixelGrid, RunSummary,
};

use crate::preferences::RenderPreferences;

/// A named description waiting to be rendered.
struct Job {
    name: String,
    description: FractalDescription,
}

fn preset_jobs() -> Vec<Job> {
    [
        ("sierpinski", FractalDescription::sierpinski()),
        ("barnsley_fern", FractalDescription::barnsley_fern()),
        ("julia", FractalDescription::julia()),
    ]
    .into_iter()
    .map(|(name, description)| Job {
        name: name.to_string(),
        description,
    })
    .collect()
}

fn file_jobs(files: &[String]) -> Vec<Job> {
    let mut jobs = Vec::new();
    for file in files {
        let path = Path::new(file);
        match codec::decode_file(path) {
            Ok(description) => {
                let name = path
                    .file_stem()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string();
                jobs.push(Job { name, description });
            }
            Err(e) => error!("Failed to load description {}: {e}", path.display()),
        }
    }
    jobs
}

/// Run the chaos game for one job, then write `<name>.png` and `<name>.txt`.
fn render_job(
    job: Job,
    steps: u64,
    prefs: &RenderPreferences,
    out_dir: &Path,
) -> chaosgame_render::Result<()> {
    let Job { name, description } = job;
    let mut engine = match prefs.seed {
        Some(seed) => ChaosEngine::with_seed(description, prefs.width, prefs.height, seed)?,
        None => ChaosEngine::new(description, prefs.width, prefs.height)?,
    };

    let label = name.clone();
    engine.register_observer(move |summary: &RunSummary, canvas: &PixelGrid| {
        debug!(
            "{label}: {}/{} steps, {} cells hit, busiest cell {}",
            summary.steps_completed,
            summary.steps_requested,
            canvas.hit_count(),
            canvas.max_count()
        );
    });

    engine.run(steps)?;

    let meta = ExportMetadata {
        fractal_type: name.clone(),
        steps: Some(steps),
        max_iterations: None,
    };
    export_png(
        engine.canvas(),
        &out_dir.join(format!("{name}.png")),
        GrayscaleMode::HitMask,
        &meta,
    )?;
    codec::encode_file(engine.description(), out_dir.join(format!("{name}.txt")))?;
    info!("Rendered {name}");
    Ok(())
}

fn render_mandelbrot(prefs: &RenderPreferences, out_dir: &Path) -> chaosgame_render::Result<()> {
    let mut engine = MandelbrotEngine::new(prefs.width, prefs.height)?
        .with_max_iterations(prefs.mandelbrot_iterations)?;
    engine.render()?;

    let meta = ExportMetadata {
        fractal_type: "mandelbrot".into(),
        steps: None,
        max_iterations: Some(engine.max_iterations()),
    };
    export_png(
        engine.canvas(),
        &out_dir.join("mandelbrot.png"),
        GrayscaleMode::Normalized,
        &meta,
    )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting ChaosGame");

    let prefs = RenderPreferences::load();
    prefs.save();

    let out_dir: PathBuf = prefs.output_directory();
    if let Err(e) = std::fs::create_dir_all(&out_dir) {
        error!("Failed to create output directory {}: {e}", out_dir.display());
        return;
    }

    let steps = match validate_steps(prefs.steps) {
        Ok(steps) => steps,
        Err(e) => {
            error!("Invalid preferences: {e}");
            return;
        }
    };

    let mut jobs = Vec::new();
    if prefs.render_presets {
        jobs.extend(preset_jobs());
    }
    jobs.extend(file_jobs(&prefs.description_files));

    for job in jobs {
        let name = job.name.clone();
        if let Err(e) = render_job(job, steps, &prefs, &out_dir) {
            error!("Failed to render {name}: {e}");
        }
    }

    if prefs.render_mandelbrot {
        if let Err(e) = render_mandelbrot(&prefs, &out_dir) {
            error!("Failed to render mandelbrot: {e}");
        }
    }

    info!("Output written to {}", out_dir.display());
}
