//! Frame composition
//!
//! Turns a session into the ordered primitive list for one frame:
//! trail → enemies → particles → player → focus overlay.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::primitive::{DrawPrimitive, Stroke};
use super::shapes::{ShapePose, render_shape};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::settings::Settings;
use crate::sim::state::{Color, GameSession, PARTICLE_LIFE, palette};

/// Particle dot radius
const PARTICLE_RADIUS: f32 = 2.0;

/// Player outline width
const PLAYER_OUTLINE: f32 = 2.0;

/// Alpha of the full-screen focus tint
const FOCUS_OVERLAY_ALPHA: u8 = 30;

/// Stateful only in its jitter RNG, kept apart from the simulation's stream
#[derive(Debug, Clone)]
pub struct SceneRenderer {
    rng: Pcg32,
}

impl SceneRenderer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Primitives for the current frame; empty between rounds
    pub fn render(&mut self, session: &GameSession, settings: &Settings) -> Vec<DrawPrimitive> {
        let mut frame = Vec::new();
        if !session.active {
            return frame;
        }

        if settings.player_trail {
            trail(&mut frame, session);
        }

        let shake = if settings.effective_screen_shake() {
            session.screen_shake
        } else {
            0.0
        };
        for enemy in &session.enemies {
            let mut prims = render_shape(enemy.shape, &ShapePose::from_enemy(enemy));
            if shake > 0.0 {
                let jitter = self.jitter(shake);
                for prim in prims.iter_mut() {
                    prim.translate(jitter);
                }
            }
            frame.extend(prims);
        }

        for particle in &session.particles {
            let alpha = (255 * particle.life.min(PARTICLE_LIFE) / PARTICLE_LIFE) as u8;
            frame.push(DrawPrimitive::circle(
                particle.pos,
                PARTICLE_RADIUS,
                particle.color.with_alpha(alpha),
            ));
        }

        let player = &session.player;
        let focus = session.abilities.focus_active();
        frame.push(DrawPrimitive::circle(player.pos, player.size, player_color(session)));
        frame.push(DrawPrimitive::ring(
            player.pos,
            player.size,
            palette::BLACK,
            PLAYER_OUTLINE,
        ));

        if focus && settings.focus_overlay {
            frame.push(DrawPrimitive::Rect {
                min: Vec2::ZERO,
                size: Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                color: palette::YELLOW.with_alpha(FOCUS_OVERLAY_ALPHA),
                stroke: Stroke::Fill,
            });
        }

        frame
    }

    /// Independent offset per axis in [-magnitude, magnitude]
    fn jitter(&mut self, magnitude: f32) -> Vec2 {
        Vec2::new(
            self.rng.random_range(-magnitude..=magnitude),
            self.rng.random_range(-magnitude..=magnitude),
        )
    }
}

/// White; cyan while shrunk; yellow while focused (focus wins)
pub fn player_color(session: &GameSession) -> Color {
    if session.abilities.focus_active() {
        palette::YELLOW
    } else if session.abilities.shrunk() {
        palette::CYAN
    } else {
        palette::WHITE
    }
}

/// Oldest points smallest; points too small to see are skipped
fn trail(frame: &mut Vec<DrawPrimitive>, session: &GameSession) {
    let points = &session.player.trail;
    let len = points.len() as f32;
    for (i, point) in points.iter().enumerate() {
        let radius = session.player.size * 0.3 * (i as f32 / len);
        if radius >= 1.0 {
            frame.push(DrawPrimitive::circle(point.pos, radius, palette::BLUE));
        }
    }
}
