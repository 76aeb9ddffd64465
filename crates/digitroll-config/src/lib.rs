//! Digitroll configuration system
//!
//! This crate provides centralized configuration management for the
//! timer demo, loading settings from `digitroll.toml` as an alternative
//! to environment variables.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for digitroll
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DigitrollConfig {
    /// Timer display settings
    pub timer: TimerConfig,
    /// Demo host loop settings
    pub demo: DemoConfig,
}

/// Timer display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Clock the countdown starts from, "MM:SS"
    pub start: String,
    /// Roll duration per digit in milliseconds
    pub duration_ms: f32,
    /// Measured digit height in layout units
    pub content_height: f32,
}

/// Demo host loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Frame length in milliseconds
    pub frame_ms: f32,
    /// Sleep between frames (true) or run simulated time as fast as
    /// possible (false)
    pub realtime: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            start: "60:00".to_string(),
            duration_ms: 600.0,
            content_height: 20.0,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frame_ms: 16.0,
            realtime: true,
        }
    }
}

impl DigitrollConfig {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the digitroll.toml configuration file
    ///
    /// # Returns
    /// * `Ok(DigitrollConfig)` - Successfully loaded configuration
    /// * `Err(String)` - Error message if loading failed
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Load configuration from the default location (digitroll.toml in
    /// the current directory) or return default configuration if the
    /// file doesn't exist
    pub fn load_or_default() -> Self {
        Self::load_from_file("digitroll.toml").unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file
    /// values. This allows for temporary overrides without modifying the
    /// config file.
    pub fn merge_with_env(&mut self) {
        if let Ok(start) = std::env::var("DIGITROLL_START") {
            self.timer.start = start;
        }
        if let Ok(val) = std::env::var("DIGITROLL_DURATION_MS") {
            if let Ok(duration) = val.parse::<f32>() {
                self.timer.duration_ms = duration;
            }
        }
        if let Ok(val) = std::env::var("DIGITROLL_CONTENT_HEIGHT") {
            if let Ok(height) = val.parse::<f32>() {
                self.timer.content_height = height;
            }
        }
        if let Ok(val) = std::env::var("DIGITROLL_FRAME_MS") {
            if let Ok(frame) = val.parse::<f32>() {
                self.demo.frame_ms = frame;
            }
        }
        if let Ok(val) = std::env::var("DIGITROLL_REALTIME") {
            self.demo.realtime = val == "1" || val.eq_ignore_ascii_case("true");
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// This is the recommended way to load configuration:
    /// 1. Load from digitroll.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}
