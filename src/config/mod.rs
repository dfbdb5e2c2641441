use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::drawing::MarkerShape;
use crate::logging::LoggingConfig;
use crate::viewer::CursorConvention;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub composite: CompositeConfig,
    pub drawing: DrawingConfig,
    pub viewer: ViewerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeConfig {
    /// Weight of the first image in the merged view
    pub alpha: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingConfig {
    pub line_radius: i32,
    pub line_opacity: f32,
    pub marker_shape: MarkerShape,
    pub marker_radius: i32,
    pub point0_color: [u8; 3],
    pub point1_color: [u8; 3],
    /// Line colour of the primary (or current) layer
    pub line_color: [u8; 3],
    pub proposed_line_color: [u8; 3],
    pub fused_line_color: [u8; 3],
    pub text_foreground: [u8; 3],
    pub text_background: [u8; 3],
    /// TrueType font for the on-image overlay; without one the overlay only
    /// goes to the window title
    pub font_path: Option<PathBuf>,
    pub font_height: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub interactive: bool,
    pub cursor_convention: CursorConvention,
    /// Starting cursor; defaults to the convention's lower bound, or to the
    /// last correspondence in non-interactive mode
    pub initial_cursor: Option<i64>,
    pub non_interactive_timeout_ms: u64,
    pub window_title: String,
    pub target_fps: usize,
    /// Scroll amount reported by the window per wheel tick
    pub wheel_step: f32,
    pub keys: KeyBindings,
}

/// Key names per semantic action, e.g. `"Up"`, `"Q"`, `"Escape"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub advance: Vec<String>,
    pub retreat: Vec<String>,
    pub quit: Vec<String>,
    pub fullscreen: Vec<String>,
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self { alpha: 1.0 }
    }
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            line_radius: 2,
            line_opacity: 1.0,
            marker_shape: MarkerShape::Circle,
            marker_radius: 4,
            point0_color: [255, 0, 0],
            point1_color: [0, 255, 0],
            line_color: [0, 0, 255],
            proposed_line_color: [255, 165, 0],
            fused_line_color: [255, 0, 255],
            text_foreground: [0, 0, 0],
            text_background: [255, 255, 255],
            font_path: None,
            font_height: 25.0,
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            interactive: true,
            cursor_convention: CursorConvention::NothingRevealed,
            initial_cursor: None,
            non_interactive_timeout_ms: 3000,
            window_title: "Matching result".to_string(),
            target_fps: 60,
            wheel_step: 1.0,
            keys: KeyBindings::default(),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            advance: vec!["Up".to_string(), "Right".to_string()],
            retreat: vec!["Down".to_string(), "Left".to_string()],
            quit: vec!["Q".to_string(), "Escape".to_string()],
            fullscreen: vec!["F".to_string()],
        }
    }
}

impl Config {
    /// Load JSON (content starting with `{`) or TOML.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = fs::read_to_string(path)?;

        if content.trim_start().starts_with('{') {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(toml::from_str(&content)?)
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P, format: ConfigFormat) -> crate::Result<()> {
        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !(0.0..=1.0).contains(&self.composite.alpha) {
            errors.push("Composite alpha must be within [0, 1]".to_string());
        }

        if self.drawing.line_radius < 0 {
            errors.push("Line radius must be non-negative".to_string());
        }

        if !(0.0..=1.0).contains(&self.drawing.line_opacity) {
            errors.push("Line opacity must be within [0, 1]".to_string());
        }

        if self.drawing.marker_radius < 0 {
            errors.push("Marker radius must be non-negative".to_string());
        }

        if self.drawing.font_height <= 0.0 {
            errors.push("Font height must be positive".to_string());
        }

        if self.viewer.target_fps == 0 {
            errors.push("Viewer target_fps must be positive".to_string());
        }

        if self.viewer.wheel_step <= 0.0 {
            errors.push("Viewer wheel_step must be positive".to_string());
        }

        for (action, keys) in [
            ("advance", &self.viewer.keys.advance),
            ("retreat", &self.viewer.keys.retreat),
            ("quit", &self.viewer.keys.quit),
            ("fullscreen", &self.viewer.keys.fullscreen),
        ] {
            if keys.is_empty() {
                errors.push(format!("No key bound to '{}'", action));
            }
        }

        if let Err(e) = self.logging.validate() {
            errors.push(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a file extension, TOML unless it is `.json`.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }
}

pub fn load_config_or_default(config_path: Option<&Path>) -> Config {
    match config_path {
        Some(path) => match Config::load_from_file(path) {
            Ok(config) => {
                if let Err(errors) = config.validate() {
                    eprintln!("Configuration validation errors:");
                    for error in errors {
                        eprintln!("  - {}", error);
                    }
                    eprintln!("Using default configuration instead.");
                    Config::default()
                } else {
                    config
                }
            }
            Err(e) => {
                eprintln!("Failed to load config from '{}': {}", path.display(), e);
                eprintln!("Using default configuration.");
                Config::default()
            }
        },
        None => Config::default(),
    }
}
