//! Shell configuration
//!
//! Everything has a default, so an empty file (or no file) is valid:
//!
//! ```toml
//! pixels_per_pt = 1.0
//! frame_rate = 60
//!
//! [window]
//! title = "Glint App"
//! width = 800
//! height = 600
//! ```

use crate::error::{Result, ShellError};
use anyhow::Context;
use glint_platform::WindowConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Highest accepted frame rate; above this the vsync interval rounds to zero
pub const MAX_FRAME_RATE: u32 = 1_000_000_000;

/// Configuration for a windowing session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Native window settings
    pub window: WindowConfig,
    /// Fixed pixels-per-point scale applied to resize events
    pub pixels_per_pt: f32,
    /// Publish acknowledgments per second (approximate vsync rate)
    pub frame_rate: u32,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            pixels_per_pt: 1.0,
            frame_rate: 60,
        }
    }
}

impl ShellConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ShellConfig = toml::from_str(content)
            .map_err(|e| ShellError::Config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ShellConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .context("Failed to serialize shell config")
            .map_err(Into::into)
    }

    /// Check values the shell cannot run with
    pub fn validate(&self) -> Result<()> {
        if !self.pixels_per_pt.is_finite() || self.pixels_per_pt <= 0.0 {
            return Err(ShellError::Config(format!(
                "pixels_per_pt must be a positive number, got {}",
                self.pixels_per_pt
            )));
        }
        if self.frame_rate == 0 || self.frame_rate > MAX_FRAME_RATE {
            return Err(ShellError::Config(format!(
                "frame_rate must be between 1 and {MAX_FRAME_RATE}, got {}",
                self.frame_rate
            )));
        }
        Ok(())
    }

    /// Interval between publish acknowledgments
    pub fn vsync_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }

    /// Set the window configuration
    pub fn window(mut self, window: WindowConfig) -> Self {
        self.window = window;
        self
    }

    /// Set the pixels-per-point scale
    pub fn pixels_per_pt(mut self, pixels_per_pt: f32) -> Self {
        self.pixels_per_pt = pixels_per_pt;
        self
    }

    /// Set the publish rate
    pub fn frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = frame_rate;
        self
    }
}
