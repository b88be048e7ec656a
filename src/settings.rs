//! Game settings and preferences
//!
//! Persisted as JSON next to the high score file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::persistence::{read_json, write_json};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Screen shake on dash/pulse
    pub screen_shake: bool,
    /// Particle bursts from pulse
    pub particles: bool,
    /// Fading trail behind the player
    pub player_trail: bool,
    /// Yellow wash over the arena while focus runs
    pub focus_overlay: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    pub music_enabled: bool,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Visual effects - all on by default
            screen_shake: true,
            particles: true,
            player_trail: true,
            focus_overlay: true,

            // HUD
            show_fps: false,

            // Audio
            music_enabled: true,
            music_volume: 0.3,

            // Accessibility
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Load settings from `path`, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match read_json::<Settings>(path) {
            Ok(mut settings) => {
                settings.music_volume = settings.music_volume.clamp(0.0, 1.0);
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) if e.is_not_found() => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to `path` (best-effort)
    pub fn save(&self, path: &Path) {
        match write_json(path, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {}", e),
        }
    }
}
