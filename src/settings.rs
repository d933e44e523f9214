//! Display and audio preferences
//!
//! Persisted separately from the high score as a small JSON file.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::consts::{WINDOW_HEIGHT, WINDOW_WIDTH};

/// Smallest and largest integer window scale
pub const MIN_SCREEN_SCALE: u32 = 1;
pub const MAX_SCREEN_SCALE: u32 = 6;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Display ===
    /// Integer window scale applied to the base canvas
    pub screen_scale: u32,
    pub fullscreen: bool,
    /// Filtered scaling instead of nearest-neighbour
    pub smooth_scale: bool,

    // === Audio ===
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_scale: 1,
            fullscreen: false,
            smooth_scale: false,
            music_volume: 0.35,
            muted: false,
        }
    }
}

impl Settings {
    /// Windowed size in pixels for the current scale
    pub fn window_size(&self) -> (u32, u32) {
        (
            WINDOW_WIDTH as u32 * self.screen_scale,
            WINDOW_HEIGHT as u32 * self.screen_scale,
        )
    }

    /// Returns true if the scale changed
    pub fn zoom_in(&mut self) -> bool {
        self.set_scale(self.screen_scale + 1)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.set_scale(self.screen_scale.saturating_sub(1))
    }

    fn set_scale(&mut self, scale: u32) -> bool {
        let scale = scale.clamp(MIN_SCREEN_SCALE, MAX_SCREEN_SCALE);
        if scale == self.screen_scale {
            return false;
        }
        self.screen_scale = scale;
        true
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    /// Effective music volume (0 when muted)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.music_volume.clamp(0.0, 1.0)
        }
    }

    /// Read settings from a JSON file, clamping out-of-range values
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed reading {}", path.display()))?;
        let mut settings: Settings = serde_json::from_str(&json)
            .with_context(|| format!("failed parsing {}", path.display()))?;
        settings.screen_scale = settings.screen_scale.clamp(MIN_SCREEN_SCALE, MAX_SCREEN_SCALE);
        Ok(settings)
    }

    pub fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize settings")?;
        fs::write(path, json).with_context(|| format!("failed writing {}", path.display()))
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::info!("Using default settings ({err:#})");
                Self::default()
            }
        }
    }

    /// Save settings, logging failures
    pub fn save(&self, path: &Path) {
        match self.write_to(path) {
            Ok(()) => log::info!("Settings saved"),
            Err(err) => log::warn!("Failed to save settings: {err:#}"),
        }
    }
}
