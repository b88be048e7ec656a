//! Polycore - a single-screen survival arcade game
//!
//! Core modules:
//! - `sim`: Game-state simulation (spawning, enemies, abilities, collisions, particles)
//! - `renderer`: Procedural shape renderer producing draw primitives
//! - `platform`: Input, clock and frame pacing seams
//! - `persistence`: High score and settings files
//! - `game`: Frame loop orchestrator tying everything together

pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{Game, Platform};
pub use highscores::HighScore;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 1200.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;

    /// Target frame rate (one simulation tick per frame)
    pub const FPS: u32 = 60;
    /// Nominal frame duration in milliseconds
    pub const FRAME_MS: f64 = 1000.0 / FPS as f64;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 12.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const DASH_SPEED: f32 = 100.0;
    /// How long trail points stay visible
    pub const TRAIL_LIFETIME_MS: f64 = 200.0;

    /// Ability timings (milliseconds)
    pub const DASH_COOLDOWN_MS: f64 = 1000.0;
    pub const FOCUS_COOLDOWN_MS: f64 = 10_000.0;
    pub const FOCUS_DURATION_MS: f64 = 3000.0;
    pub const PULSE_COOLDOWN_MS: f64 = 3000.0;
    pub const SHRINK_COOLDOWN_MS: f64 = 8000.0;
    pub const SHRINK_DURATION_MS: f64 = 2000.0;

    /// Pulse knockback
    pub const PULSE_MAX_CHARGES: u32 = 5;
    pub const PULSE_RADIUS: f32 = 150.0;
    pub const PULSE_FORCE: f32 = 200.0;
    pub const PULSE_PARTICLES_PER_ENEMY: usize = 5;

    /// Screen shake magnitudes
    pub const DASH_SHAKE: f32 = 5.0;
    pub const PULSE_SHAKE: f32 = 10.0;

    /// Time dilation while focus is active
    pub const FOCUS_TIME_FACTOR: f32 = 0.5;

    /// Spawning
    pub const SPAWN_INTERVAL_BASE_MS: f64 = 1000.0;
    pub const SPAWN_INTERVAL_MIN_MS: f64 = 200.0;
    pub const PATTERN_SWITCH_MS: f64 = 10_000.0;
    /// Distance outside the screen edge where edge spawns appear
    pub const SPAWN_EDGE_OFFSET: f32 = 50.0;
    pub const SPIRAL_RADIUS: f32 = 400.0;
    pub const RING_RADIUS: f32 = 500.0;
    pub const WAVE_AMPLITUDE: f32 = 200.0;

    /// Enemies are culled once this far past any screen edge
    pub const CULL_MARGIN: f32 = 100.0;
    /// Fraction of the enemy size used for its hitbox
    pub const ENEMY_HITBOX_SCALE: f32 = 0.6;
    /// Per-tick animation phase increments
    pub const PULSE_PHASE_STEP: f32 = 0.05;
    pub const DIMENSION_PHASE_STEP: f32 = 0.03;
}

/// Center of the play field
#[inline]
pub fn screen_center() -> Vec2 {
    Vec2::new(consts::SCREEN_WIDTH / 2.0, consts::SCREEN_HEIGHT / 2.0)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Point at `radius` from `center` in direction `theta`
#[inline]
pub fn polar_offset(center: Vec2, r: f32, theta: f32) -> Vec2 {
    center + polar_to_cartesian(r, theta)
}
