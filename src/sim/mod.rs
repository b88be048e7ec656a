//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, driven by an injected session clock
//! - Seeded RNG only
//! - Stable iteration order (enemy list order)
//! - No rendering or platform dependencies

pub mod ability;
pub mod autopilot;
pub mod collision;
pub mod particle;
pub mod spawn;
pub mod state;
pub mod tick;

pub use ability::{AbilityKind, AbilityReadiness, Abilities, ChargePool, Cooldown, TimedAbility};
pub use collision::{collides, first_collision, pulse_knockback};
pub use spawn::{SpawnContext, spawn_enemy};
pub use state::{
    Color, Enemy, GameEvent, GameSession, MAX_PARTICLES, PARTICLE_LIFE, Particle, Pattern, Player,
    ShapeKind, TrailPoint, palette,
};
pub use tick::{TickInput, advance_enemies, tick};
