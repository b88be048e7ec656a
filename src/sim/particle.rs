//! Short-lived visual particles
//!
//! Plain Euler-integrated points with a tick countdown. They never affect
//! gameplay.

use glam::Vec2;
use rand::Rng;

use super::state::{Color, MAX_PARTICLES, PARTICLE_LIFE, Particle};
use crate::polar_to_cartesian;

/// Spawn `count` particles at `pos` flying off at random angles
pub fn emit_burst<R: Rng>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    pos: Vec2,
    count: usize,
    color: Color,
) {
    for _ in 0..count {
        if particles.len() >= MAX_PARTICLES {
            particles.remove(0);
        }
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(2.0..6.0);
        particles.push(Particle {
            pos,
            vel: polar_to_cartesian(speed, angle),
            life: PARTICLE_LIFE,
            color,
        });
    }
}

/// Advance every particle one tick and drop the expired ones
pub fn update(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life = particle.life.saturating_sub(1);
    }
    particles.retain(|p| p.life > 0);
}
