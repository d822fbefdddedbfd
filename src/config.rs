//! Configuration management for the LED inference service

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub models: ModelsConfig,
    #[serde(default)]
    pub labels: LabelsConfig,
    pub logging: LoggingConfig,
}

/// Model artifacts configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsConfig {
    /// Directory containing the four exported artifacts
    pub models_dir: String,
    /// Number of threads for ONNX inference (default: 1)
    #[serde(default = "default_onnx_threads")]
    pub onnx_threads: usize,
}

/// Presentation strings for the two decision classes.
///
/// The classifier itself only knows classes 0 and 1; what the surrounding
/// application prints for them is a locale choice, not a model property.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelsConfig {
    /// Label for class 1 (turn the LED on)
    #[serde(default = "default_on_label")]
    pub on: String,
    /// Label for class 0 (turn the LED off)
    #[serde(default = "default_off_label")]
    pub off: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

fn default_onnx_threads() -> usize {
    1
}

fn default_on_label() -> String {
    "ON".to_string()
}

fn default_off_label() -> String {
    "OFF".to_string()
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            on: default_on_label(),
            off: default_off_label(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file location
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            models: ModelsConfig {
                models_dir: "models".to_string(),
                onnx_threads: 1,
            },
            labels: LabelsConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}
