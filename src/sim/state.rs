//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives on [`GameSession`], which is built
//! explicitly and passed by reference. There is no global game instance.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ability::{AbilityKind, Abilities};
use crate::consts::*;
use crate::screen_center;

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Brighten (positive) or darken (negative) every channel, clamped to 0..=255
    pub fn shade(self, delta: i16) -> Self {
        let adjust = |c: u8| (c as i16 + delta).clamp(0, 255) as u8;
        Self {
            r: adjust(self.r),
            g: adjust(self.g),
            b: adjust(self.b),
            a: self.a,
        }
    }

    /// Normalized `[r, g, b, a]` for GPU upload
    pub fn to_f32_array(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

/// Named colors
pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 100, 100);
    pub const BLUE: Color = Color::rgb(100, 150, 255);
    pub const GREEN: Color = Color::rgb(100, 255, 150);
    pub const YELLOW: Color = Color::rgb(255, 255, 100);
    pub const PURPLE: Color = Color::rgb(200, 100, 255);
    pub const ORANGE: Color = Color::rgb(255, 150, 100);
    pub const CYAN: Color = Color::rgb(100, 255, 255);
    pub const PINK: Color = Color::rgb(255, 150, 200);
    pub const GRAY: Color = Color::rgb(128, 128, 128);

    /// Background the arena is cleared to (cutouts are painted with it)
    pub const BACKGROUND: Color = BLACK;

    /// Colors an enemy may be spawned with
    pub const ENEMY_COLORS: [Color; 8] = [RED, BLUE, GREEN, YELLOW, PURPLE, ORANGE, CYAN, PINK];
}

/// Every enemy silhouette the renderer knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    // Flat basics
    #[default]
    Circle,
    Triangle,
    Square,
    Pentagon,
    Hexagon,
    Octagon,
    Star,
    Diamond,
    Ellipse,
    Cross,
    // Flat complex
    Arrow,
    Heart,
    Crescent,
    Spiral,
    Lightning,
    Bowtie,
    Hourglass,
    Flower,
    Gear,
    Snowflake,
    // Pseudo-3D solids
    Cube,
    Pyramid,
    Cylinder,
    Cone,
    Sphere,
    Torus,
    Prism,
    Dodecahedron,
    Icosahedron,
    Tetrahedron,
    // 4D projections
    Tesseract,
    Hypersphere,
    Hyperprism,
    Simplex4d,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 34] = [
        ShapeKind::Circle,
        ShapeKind::Triangle,
        ShapeKind::Square,
        ShapeKind::Pentagon,
        ShapeKind::Hexagon,
        ShapeKind::Octagon,
        ShapeKind::Star,
        ShapeKind::Diamond,
        ShapeKind::Ellipse,
        ShapeKind::Cross,
        ShapeKind::Arrow,
        ShapeKind::Heart,
        ShapeKind::Crescent,
        ShapeKind::Spiral,
        ShapeKind::Lightning,
        ShapeKind::Bowtie,
        ShapeKind::Hourglass,
        ShapeKind::Flower,
        ShapeKind::Gear,
        ShapeKind::Snowflake,
        ShapeKind::Cube,
        ShapeKind::Pyramid,
        ShapeKind::Cylinder,
        ShapeKind::Cone,
        ShapeKind::Sphere,
        ShapeKind::Torus,
        ShapeKind::Prism,
        ShapeKind::Dodecahedron,
        ShapeKind::Icosahedron,
        ShapeKind::Tetrahedron,
        ShapeKind::Tesseract,
        ShapeKind::Hypersphere,
        ShapeKind::Hyperprism,
        ShapeKind::Simplex4d,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Square => "square",
            ShapeKind::Pentagon => "pentagon",
            ShapeKind::Hexagon => "hexagon",
            ShapeKind::Octagon => "octagon",
            ShapeKind::Star => "star",
            ShapeKind::Diamond => "diamond",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Cross => "cross",
            ShapeKind::Arrow => "arrow",
            ShapeKind::Heart => "heart",
            ShapeKind::Crescent => "crescent",
            ShapeKind::Spiral => "spiral",
            ShapeKind::Lightning => "lightning",
            ShapeKind::Bowtie => "bowtie",
            ShapeKind::Hourglass => "hourglass",
            ShapeKind::Flower => "flower",
            ShapeKind::Gear => "gear",
            ShapeKind::Snowflake => "snowflake",
            ShapeKind::Cube => "cube",
            ShapeKind::Pyramid => "pyramid",
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::Cone => "cone",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Torus => "torus",
            ShapeKind::Prism => "prism",
            ShapeKind::Dodecahedron => "dodecahedron",
            ShapeKind::Icosahedron => "icosahedron",
            ShapeKind::Tetrahedron => "tetrahedron",
            ShapeKind::Tesseract => "tesseract",
            ShapeKind::Hypersphere => "hypersphere",
            ShapeKind::Hyperprism => "hyperprism",
            ShapeKind::Simplex4d => "simplex_4d",
        }
    }

    /// True for the kinds animated by the dimension phase
    pub fn is_projection(&self) -> bool {
        matches!(
            self,
            ShapeKind::Tesseract | ShapeKind::Hypersphere | ShapeKind::Hyperprism | ShapeKind::Simplex4d
        )
    }
}

/// Spawn-position strategy, switched on a fixed timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    #[default]
    Random,
    Spiral,
    Wave,
    Circle,
    Zigzag,
    Cross,
    Burst,
    Orbit,
}

impl Pattern {
    pub const ALL: [Pattern; 8] = [
        Pattern::Random,
        Pattern::Spiral,
        Pattern::Wave,
        Pattern::Circle,
        Pattern::Zigzag,
        Pattern::Cross,
        Pattern::Burst,
        Pattern::Orbit,
    ];
}

/// A homing geometric enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub shape: ShapeKind,
    /// Radius-equivalent size
    pub size: f32,
    pub color: Color,
    /// Radians
    pub rotation: f32,
    pub rotation_speed: f32,
    /// Drives the breathing-size animation
    pub pulse_phase: f32,
    /// Drives the 4D projection animation
    pub dimension_phase: f32,
}

impl Enemy {
    /// Advance kinematics and animation clocks by one tick
    pub fn advance(&mut self, time_factor: f32) {
        self.pos += self.vel * time_factor;
        self.rotation += self.rotation_speed * time_factor;
        self.pulse_phase += PULSE_PHASE_STEP * time_factor;
        self.dimension_phase += DIMENSION_PHASE_STEP * time_factor;
    }

    /// Past the cull margin on any side
    pub fn is_off_screen(&self) -> bool {
        self.pos.x < -CULL_MARGIN
            || self.pos.x > SCREEN_WIDTH + CULL_MARGIN
            || self.pos.y < -CULL_MARGIN
            || self.pos.y > SCREEN_HEIGHT + CULL_MARGIN
    }

    /// Portion of the size that counts toward collisions
    #[inline]
    pub fn hit_radius(&self) -> f32 {
        self.size * ENEMY_HITBOX_SCALE
    }
}

/// Trail sample for rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub time_ms: f64,
}

/// The player-controlled point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub base_size: f32,
    /// Current effective size (halved while shrunk)
    pub size: f32,
    /// Recent positions, oldest first
    #[serde(skip)]
    pub trail: Vec<TrailPoint>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: screen_center(),
            base_size: PLAYER_SIZE,
            size: PLAYER_SIZE,
            trail: Vec::new(),
        }
    }
}

impl Player {
    /// Move by `delta`, clamped so the body stays on screen
    pub fn move_by(&mut self, delta: Vec2) {
        let r = self.size;
        self.pos.x = (self.pos.x + delta.x).clamp(r, SCREEN_WIDTH - r);
        self.pos.y = (self.pos.y + delta.y).clamp(r, SCREEN_HEIGHT - r);
    }

    /// Record current position and drop samples older than the trail lifetime
    pub fn record_trail(&mut self, now_ms: f64) {
        self.trail.push(TrailPoint {
            pos: self.pos,
            time_ms: now_ms,
        });
        self.trail.retain(|p| now_ms - p.time_ms < TRAIL_LIFETIME_MS);
    }
}

/// A short-lived visual point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining ticks
    pub life: u32,
    pub color: Color,
}

/// Ticks a freshly spawned particle lives for
pub const PARTICLE_LIFE: u32 = 30;

/// Maximum live particles
pub const MAX_PARTICLES: usize = 512;

/// Notifications for the presentation layer, drained once per frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RoundStarted,
    RoundEnded { score: f64, new_best: bool },
    AbilityUsed(AbilityKind),
    AbilityExpired(AbilityKind),
    PatternChanged(Pattern),
}

/// Complete simulation state for one game session
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Seed the RNG was built from
    pub seed: u64,
    pub rng: Pcg32,
    pub player: Player,
    pub abilities: Abilities,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    /// Survival time in seconds
    pub score: f64,
    /// Best score known to the session
    pub high_score: f64,
    pub difficulty: f64,
    pub pattern: Pattern,
    /// Session time the current round started
    pub round_start_ms: f64,
    /// Session time of the last spawn (None = spawn on next tick)
    pub last_spawn_ms: Option<f64>,
    /// Session time the pattern last switched
    pub pattern_timer_ms: f64,
    /// Enemies spawned this round
    pub spawn_count: u64,
    /// Current screen-shake magnitude (pixels, decays by one per tick)
    pub screen_shake: f32,
    /// Ticks simulated this round
    pub time_ticks: u64,
    /// A round is in progress
    pub active: bool,
    pub paused: bool,
    /// Spawn particle bursts (can be disabled in settings)
    pub particles_enabled: bool,
    pub events: Vec<GameEvent>,
}

impl GameSession {
    /// Create an idle session; call [`GameSession::start_round`] to play
    pub fn new(seed: u64, high_score: f64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::default(),
            abilities: Abilities::default(),
            enemies: Vec::new(),
            particles: Vec::new(),
            score: 0.0,
            high_score,
            difficulty: 1.0,
            pattern: Pattern::Random,
            round_start_ms: 0.0,
            last_spawn_ms: None,
            pattern_timer_ms: 0.0,
            spawn_count: 0,
            screen_shake: 0.0,
            time_ticks: 0,
            active: false,
            paused: false,
            particles_enabled: true,
            events: Vec::new(),
        }
    }

    /// Reset everything round-scoped and begin a new round at `now_ms`
    pub fn start_round(&mut self, now_ms: f64) {
        self.player = Player::default();
        self.abilities.reset();
        self.enemies.clear();
        self.particles.clear();
        self.score = 0.0;
        self.difficulty = 1.0;
        self.pattern = Pattern::Random;
        self.round_start_ms = now_ms;
        self.last_spawn_ms = None;
        self.pattern_timer_ms = now_ms;
        self.spawn_count = 0;
        self.screen_shake = 0.0;
        self.time_ticks = 0;
        self.paused = false;
        self.active = true;
        self.events.push(GameEvent::RoundStarted);
        log::info!("Round started (seed {}, best {:.1}s)", self.seed, self.high_score);
    }

    /// Recompute score and difficulty from elapsed round time
    pub fn update_score(&mut self, now_ms: f64) {
        self.score = ((now_ms - self.round_start_ms) / 1000.0).max(0.0);
        self.difficulty = difficulty_for_score(self.score);
    }

    /// Current gap between spawns
    pub fn spawn_interval_ms(&self) -> f64 {
        spawn_interval_for_score(self.score)
    }

    /// Multiplier applied to enemy simulation this tick
    pub fn time_factor(&self) -> f32 {
        self.abilities.time_factor()
    }

    /// Restart screen shake at `magnitude`, replacing whatever is left
    pub fn shake(&mut self, magnitude: f32) {
        self.screen_shake = magnitude;
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Enemy speed multiplier for a given survival time (1x, 2x at 30s, 3x at 60s...)
pub fn difficulty_for_score(score: f64) -> f64 {
    1.0 + score / 30.0
}

/// Milliseconds between spawns for a given survival time
pub fn spawn_interval_for_score(score: f64) -> f64 {
    (SPAWN_INTERVAL_BASE_MS - 10.0 * score).max(SPAWN_INTERVAL_MIN_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_shade_clamps() {
        let c = Color::rgb(250, 10, 128);
        assert_eq!(c.shade(30), Color::rgb(255, 40, 158));
        assert_eq!(c.shade(-50), Color::rgb(200, 0, 78));
        assert_eq!(c.with_alpha(30).shade(10).a, 30);
    }

    #[test]
    fn test_shape_kind_table_is_complete() {
        assert_eq!(ShapeKind::ALL.len(), 34);
        let mut names: Vec<_> = ShapeKind::ALL.iter().map(|k| k.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 34);
    }

    #[test]
    fn test_difficulty_and_spawn_interval() {
        assert_eq!(difficulty_for_score(0.0), 1.0);
        assert_eq!(difficulty_for_score(30.0), 2.0);
        assert_eq!(difficulty_for_score(60.0), 3.0);
        assert_eq!(spawn_interval_for_score(0.0), 1000.0);
        assert_eq!(spawn_interval_for_score(50.0), 500.0);
        assert_eq!(spawn_interval_for_score(80.0), 200.0);
        assert_eq!(spawn_interval_for_score(500.0), 200.0);
    }

    #[test]
    fn test_enemy_cull_margin() {
        let mut enemy = Enemy {
            pos: Vec2::new(-100.0, 400.0),
            vel: Vec2::ZERO,
            shape: ShapeKind::Circle,
            size: 20.0,
            color: palette::RED,
            rotation: 0.0,
            rotation_speed: 0.0,
            pulse_phase: 0.0,
            dimension_phase: 0.0,
        };
        assert!(!enemy.is_off_screen());
        enemy.pos.x = -100.5;
        assert!(enemy.is_off_screen());
        enemy.pos = Vec2::new(600.0, SCREEN_HEIGHT + 101.0);
        assert!(enemy.is_off_screen());
    }

    #[test]
    fn test_player_clamped_to_screen() {
        let mut player = Player::default();
        player.move_by(Vec2::new(-10_000.0, 10_000.0));
        assert_eq!(player.pos, Vec2::new(PLAYER_SIZE, SCREEN_HEIGHT - PLAYER_SIZE));
    }

    #[test]
    fn test_trail_drops_old_points() {
        let mut player = Player::default();
        player.record_trail(0.0);
        player.record_trail(150.0);
        player.record_trail(250.0);
        assert_eq!(player.trail.len(), 2);
        assert_eq!(player.trail[0].time_ms, 150.0);
    }

    #[test]
    fn test_start_round_resets_state() {
        let mut session = GameSession::new(7, 12.5);
        session.score = 99.0;
        session.screen_shake = 4.0;
        session.pattern = Pattern::Burst;
        session.start_round(5000.0);
        assert!(session.active);
        assert_eq!(session.score, 0.0);
        assert_eq!(session.screen_shake, 0.0);
        assert_eq!(session.pattern, Pattern::Random);
        assert_eq!(session.round_start_ms, 5000.0);
        assert_eq!(session.high_score, 12.5);
        assert_eq!(session.drain_events(), vec![GameEvent::RoundStarted]);
        assert!(session.events.is_empty());
    }

    #[test]
    fn test_shake_replaces_current() {
        let mut session = GameSession::new(1, 0.0);
        session.shake(10.0);
        session.shake(5.0);
        assert_eq!(session.screen_shake, 5.0);
    }
}
