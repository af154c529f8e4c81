use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

// ---------------------------------------------------------------------------
// Render preferences
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderPreferences {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Chaos-game steps per render. Signed so a hand-edited negative value
    /// is reported instead of failing the whole file.
    #[serde(default = "default_steps")]
    pub steps: i64,
    /// Fixed RNG seed for reproducible images. `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_true")]
    pub render_presets: bool,
    #[serde(default = "default_true")]
    pub render_mandelbrot: bool,
    #[serde(default = "default_mandelbrot_iterations")]
    pub mandelbrot_iterations: u32,
    /// Description files (text format) to render in addition to the presets.
    #[serde(default)]
    pub description_files: Vec<String>,
    /// Output directory. When empty, a `renders/` folder next to the executable is used.
    #[serde(default)]
    pub output_dir: String,
}

fn default_width() -> u32 {
    400
}
fn default_height() -> u32 {
    400
}
fn default_steps() -> i64 {
    1_000_000
}
fn default_true() -> bool {
    true
}
fn default_mandelbrot_iterations() -> u32 {
    chaosgame_core::DEFAULT_MAX_ITERATIONS
}

impl Default for RenderPreferences {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            steps: default_steps(),
            seed: None,
            render_presets: true,
            render_mandelbrot: true,
            mandelbrot_iterations: default_mandelbrot_iterations(),
            description_files: Vec::new(),
            output_dir: String::new(),
        }
    }
}

impl RenderPreferences {
    /// Load preferences from next to the executable, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(json) => match serde_json::from_str::<RenderPreferences>(&json) {
                    Ok(prefs) => {
                        info!("Loaded preferences from {}", path.display());
                        return prefs;
                    }
                    Err(e) => {
                        error!("Failed to parse preferences: {e}");
                    }
                },
                Err(e) => {
                    error!("Failed to read preferences file: {e}");
                }
            }
        } else {
            debug!("No preferences file at {}", path.display());
        }
        Self::default()
    }

    /// Persist preferences to disk.
    pub fn save(&self) {
        let path = config_path();
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, &json) {
                    error!("Failed to write preferences: {e}");
                } else {
                    debug!("Saved preferences to {}", path.display());
                }
            }
            Err(e) => error!("Failed to serialize preferences: {e}"),
        }
    }

    /// Resolved output directory.
    pub fn output_directory(&self) -> PathBuf {
        if self.output_dir.is_empty() {
            crate::app_dir::renders_directory()
        } else {
            PathBuf::from(&self.output_dir)
        }
    }
}

fn config_path() -> PathBuf {
    crate::app_dir::exe_directory().join("preferences.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let prefs: RenderPreferences = serde_json::from_str(r#"{"width": 800}"#).unwrap();
        assert_eq!(prefs.width, 800);
        assert_eq!(prefs.height, 400);
        assert_eq!(prefs.steps, 1_000_000);
        assert_eq!(prefs.seed, None);
        assert!(prefs.render_presets);
        assert_eq!(prefs.mandelbrot_iterations, 40);
    }

    #[test]
    fn explicit_output_dir_wins() {
        let prefs = RenderPreferences {
            output_dir: "/tmp/out".into(),
            ..RenderPreferences::default()
        };
        assert_eq!(prefs.output_directory(), PathBuf::from("/tmp/out"));
    }

    #[test]
    fn round_trips_through_json() {
        let prefs = RenderPreferences {
            seed: Some(7),
            description_files: vec!["fern.txt".into()],
            ..RenderPreferences::default()
        };
        let json = serde_json::to_string(&prefs).unwrap();
        let back: RenderPreferences = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, Some(7));
        assert_eq!(back.description_files, vec!["fern.txt".to_string()]);
    }
}
