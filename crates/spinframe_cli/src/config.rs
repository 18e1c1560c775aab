//! spinframe configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use spinframe_animation::TimelineSettings;
use spinframe_app::{CanvasGeometry, DocumentTemplate, EditorSettings};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file name
pub const CONFIG_FILE: &str = "spinframe.toml";

/// Top-level spinframe configuration (spinframe.toml)
#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SpinframeConfig {
    #[serde(default)]
    pub timeline: TimelineSettings,
    #[serde(default)]
    pub canvas: CanvasGeometry,
    #[serde(default)]
    pub export: DocumentTemplate,
    #[serde(default)]
    pub playback: PlaybackConfig,
}

/// Headless playback configuration
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct PlaybackConfig {
    /// Time between synthetic frames
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u32,
}

fn default_frame_interval() -> u32 {
    16
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: default_frame_interval(),
        }
    }
}

impl PlaybackConfig {
    /// Frame interval in seconds
    pub fn frame_interval(&self) -> f32 {
        self.frame_interval_ms as f32 / 1000.0
    }
}

fn config_path(path: &Path) -> PathBuf {
    if path.is_file() {
        path.to_path_buf()
    } else {
        path.join(CONFIG_FILE)
    }
}

impl SpinframeConfig {
    /// Load configuration from a directory (looks for spinframe.toml)
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = config_path(path);

        if !config_path.exists() {
            anyhow::bail!(
                "No {} found in {}. Run `spinframe init` to create one.",
                CONFIG_FILE,
                path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    /// Load configuration if present, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if config_path(path).exists() {
            Self::load_from_dir(path)
        } else {
            tracing::debug!(dir = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid configuration")
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Settings for an editor session
    pub fn editor_settings(&self) -> EditorSettings {
        EditorSettings {
            timeline: self.timeline,
            canvas: self.canvas,
        }
    }
}
