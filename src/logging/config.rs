//! Logging configuration
//!
//! Per-component log levels and output destinations for the viewer.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Where log output goes and how much of it, per area of the crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for everything not covered below (trace, debug, info, warn, error)
    pub global_level: String,

    /// Human-readable output on stderr
    pub console_output: bool,

    /// Directory for JSON log files (None = no file logging)
    pub log_directory: Option<PathBuf>,

    /// Add source file and line to console records
    pub include_file_location: bool,

    /// Level for model and compositing messages
    pub model_level: String,

    /// Level for frame rendering messages
    pub render_level: String,

    /// Level for the interactive loop
    pub viewer_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            global_level: "info".to_string(),
            console_output: true,
            log_directory: None,
            include_file_location: false,
            model_level: "info".to_string(),
            render_level: "info".to_string(),
            viewer_level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Warnings only, console only
    pub fn quiet() -> Self {
        Self::default().with_level("warn")
    }

    /// Set every level at once, e.g. from a `-v` count on the command line
    pub fn with_level(mut self, level: &str) -> Self {
        self.global_level = level.to_string();
        self.model_level = level.to_string();
        self.render_level = level.to_string();
        self.viewer_level = level.to_string();
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, level) in [
            ("global_level", &self.global_level),
            ("model_level", &self.model_level),
            ("render_level", &self.render_level),
            ("viewer_level", &self.viewer_level),
        ] {
            if !VALID_LEVELS.contains(&level.as_str()) {
                return Err(format!(
                    "Invalid {}: {}. Must be one of: {:?}",
                    name, level, VALID_LEVELS
                ));
            }
        }

        if let Some(ref log_dir) = self.log_directory {
            if let Some(parent) = log_dir.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(format!("Log directory parent does not exist: {:?}", parent));
                }
            }
        }

        Ok(())
    }

    /// `EnvFilter` directives for this crate's modules
    pub fn filter_directives(&self, crate_name: &str) -> String {
        format!(
            "{krate}={global},{krate}::model={model},{krate}::compositing={model},{krate}::drawing={render},{krate}::viewer={viewer}",
            krate = crate_name,
            global = self.global_level,
            model = self.model_level,
            render = self.render_level,
            viewer = self.viewer_level,
        )
    }
}
