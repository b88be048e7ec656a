//! Pattern-driven enemy factory

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::f32::consts::TAU;

use super::state::{Enemy, Pattern, ShapeKind, palette};
use crate::consts::*;
use crate::{polar_offset, screen_center};

/// Inputs the spawner reads from the session
#[derive(Debug, Clone, Copy)]
pub struct SpawnContext {
    pub pattern: Pattern,
    pub player_pos: Vec2,
    pub difficulty: f64,
    /// Session time, drives the spiral and wave oscillation
    pub now_ms: f64,
    /// Enemies spawned so far this round (wave alternates sides on it)
    pub spawn_index: u64,
}

/// Where a new enemy enters for the given pattern
pub fn spawn_position<R: Rng>(ctx: &SpawnContext, rng: &mut R) -> Vec2 {
    match ctx.pattern {
        Pattern::Spiral => {
            let angle = ((ctx.now_ms * 0.01) as f32).rem_euclid(TAU);
            polar_offset(screen_center(), SPIRAL_RADIUS, angle)
        }
        Pattern::Wave => {
            let x = if ctx.spawn_index % 2 == 0 { 0.0 } else { SCREEN_WIDTH };
            let y = SCREEN_HEIGHT / 2.0 + (ctx.now_ms * 0.005).sin() as f32 * WAVE_AMPLITUDE;
            Vec2::new(x, y)
        }
        Pattern::Circle | Pattern::Orbit => {
            let angle = rng.random_range(0.0..TAU);
            polar_offset(screen_center(), RING_RADIUS, angle)
        }
        Pattern::Random | Pattern::Zigzag | Pattern::Cross | Pattern::Burst => edge_position(rng),
    }
}

/// Random point just outside a uniformly chosen screen edge
fn edge_position<R: Rng>(rng: &mut R) -> Vec2 {
    match rng.random_range(0..4) {
        0 => Vec2::new(rng.random_range(0.0..=SCREEN_WIDTH), -SPAWN_EDGE_OFFSET),
        1 => Vec2::new(
            SCREEN_WIDTH + SPAWN_EDGE_OFFSET,
            rng.random_range(0.0..=SCREEN_HEIGHT),
        ),
        2 => Vec2::new(
            rng.random_range(0.0..=SCREEN_WIDTH),
            SCREEN_HEIGHT + SPAWN_EDGE_OFFSET,
        ),
        _ => Vec2::new(-SPAWN_EDGE_OFFSET, rng.random_range(0.0..=SCREEN_HEIGHT)),
    }
}

/// Velocity homing on the player with a little jitter
pub fn homing_velocity<R: Rng>(from: Vec2, target: Vec2, difficulty: f64, rng: &mut R) -> Vec2 {
    let to_target = target - from;
    let distance = to_target.length();
    if distance > 0.0 {
        let speed = rng.random_range(1.0..3.0) * difficulty as f32;
        let jitter = Vec2::new(rng.random_range(-0.5..0.5), rng.random_range(-0.5..0.5));
        to_target / distance * speed + jitter
    } else {
        Vec2::new(rng.random_range(-2.0..2.0), rng.random_range(-2.0..2.0))
    }
}

/// Build one enemy for the current pattern
pub fn spawn_enemy<R: Rng>(ctx: &SpawnContext, rng: &mut R) -> Enemy {
    let shape = *ShapeKind::ALL.choose(rng).unwrap_or(&ShapeKind::Circle);
    let pos = spawn_position(ctx, rng);
    let vel = homing_velocity(pos, ctx.player_pos, ctx.difficulty, rng);
    let size = rng.random_range(15.0..=40.0);
    let color = *palette::ENEMY_COLORS
        .choose(rng)
        .unwrap_or(&palette::RED);

    Enemy {
        pos,
        vel,
        shape,
        size,
        color,
        rotation: rng.random_range(0.0..TAU),
        rotation_speed: rng.random_range(-0.1..0.1),
        pulse_phase: rng.random_range(0.0..TAU),
        dimension_phase: rng.random_range(0.0..TAU),
    }
}
