//! User settings.
//!
//! Settings come from an optional JSON file with CLI flags layered on top.
//! They are read once at startup and never written back.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::scale::ScaleKind;

pub const DEFAULT_VOLUME: u8 = 75;
pub const DEFAULT_VELOCITY_SCALE: f32 = 0.1;

/// User settings for the piano
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume, 0-100
    pub volume: u8,
    /// Damping factor applied to hardware note-on velocities
    pub velocity_scale: f32,
    /// Directory holding a sample library and its manifest
    pub sample_dir: Option<PathBuf>,
    /// Draw note names on the white keys
    pub show_labels: bool,
    /// Scale kind used for the highlight readout
    pub scale_kind: ScaleKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            velocity_scale: DEFAULT_VELOCITY_SCALE,
            sample_dir: None,
            show_labels: true,
            scale_kind: ScaleKind::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file. Missing fields keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Layer CLI overrides on top of the file values.
    pub fn with_overrides(
        mut self,
        volume: Option<u8>,
        velocity_scale: Option<f32>,
        sample_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(volume) = volume {
            self.volume = volume.min(100);
        }
        if let Some(scale) = velocity_scale {
            self.velocity_scale = scale;
        }
        if sample_dir.is_some() {
            self.sample_dir = sample_dir;
        }
        self
    }
}
