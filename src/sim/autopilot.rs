//! Demo-mode autopilot
//!
//! Produces the input a cautious player would give: run from whatever is
//! closest, drift back toward the middle, and burn abilities when cornered.

use glam::Vec2;

use super::state::GameSession;
use super::tick::TickInput;
use crate::consts::SCREEN_WIDTH;
use crate::screen_center;

/// Enemies closer than this (edge to edge) push the player away
const THREAT_RADIUS: f32 = 220.0;
/// Strength of the pull back toward screen center
const CENTER_PULL: f32 = 0.6;
/// Steering below this is ignored
const DEADZONE: f32 = 0.15;
/// Edge gap that triggers each ability
const PULSE_GAP: f32 = 90.0;
const SHRINK_GAP: f32 = 60.0;
const DASH_GAP: f32 = 30.0;
/// Focus when this many enemies are inside `CROWD_RADIUS`
const CROWD_SIZE: usize = 5;
const CROWD_RADIUS: f32 = 250.0;

/// Compute this tick's input from the session state
pub fn drive(session: &GameSession, now_ms: f64) -> TickInput {
    let player = &session.player;
    let mut push = Vec2::ZERO;
    let mut nearest_gap = f32::MAX;
    let mut crowd = 0;

    for enemy in &session.enemies {
        let offset = player.pos - enemy.pos;
        let distance = offset.length();
        let gap = distance - enemy.hit_radius() - player.size;
        nearest_gap = nearest_gap.min(gap);
        if distance < CROWD_RADIUS {
            crowd += 1;
        }
        if gap < THREAT_RADIUS {
            let weight = 1.0 - gap.max(0.0) / THREAT_RADIUS;
            // Weight up enemies closing in
            let closing = enemy.vel.dot(offset.normalize_or_zero()).max(0.0);
            push += offset.normalize_or_zero() * weight * weight * (1.0 + closing);
        }
    }

    // Slow wander so idle runs don't settle into the exact center
    let t = session.time_ticks as f32 * 0.01;
    let wander = Vec2::new(t.sin(), (t * 0.7).cos()) * 0.1;
    let home = (screen_center() - player.pos) / (SCREEN_WIDTH * 0.5);
    let steer = push + home * CENTER_PULL + wander;

    let ready = session.abilities.readiness(now_ms);
    let pulse = ready.pulse && nearest_gap < PULSE_GAP;

    TickInput {
        up: steer.y < -DEADZONE,
        down: steer.y > DEADZONE,
        left: steer.x < -DEADZONE,
        right: steer.x > DEADZONE,
        dash: ready.dash && nearest_gap < DASH_GAP,
        focus: ready.focus && crowd >= CROWD_SIZE,
        pulse,
        shrink: !pulse && ready.shrink && nearest_gap < SHRINK_GAP,
        idle_mode: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, ShapeKind, palette};

    fn enemy_at(pos: Vec2, vel: Vec2) -> Enemy {
        Enemy {
            pos,
            vel,
            shape: ShapeKind::Star,
            size: 20.0,
            color: palette::PINK,
            rotation: 0.0,
            rotation_speed: 0.0,
            pulse_phase: 0.0,
            dimension_phase: 0.0,
        }
    }

    #[test]
    fn test_runs_away_from_threat() {
        let mut session = GameSession::new(1, 0.0);
        session.start_round(0.0);
        let p = session.player.pos;
        session
            .enemies
            .push(enemy_at(p + Vec2::new(120.0, 0.0), Vec2::new(-3.0, 0.0)));
        let input = drive(&session, 16.0);
        assert!(input.left);
        assert!(!input.right);
        assert!(!input.pulse);
    }

    #[test]
    fn test_pulses_when_cornered() {
        let mut session = GameSession::new(1, 0.0);
        session.start_round(0.0);
        let p = session.player.pos;
        session
            .enemies
            .push(enemy_at(p + Vec2::new(0.0, 70.0), Vec2::new(0.0, -3.0)));
        let input = drive(&session, 16.0);
        assert!(input.pulse);
        assert!(!input.shrink);
        assert!(input.up);
    }

    #[test]
    fn test_focus_when_crowded() {
        let mut session = GameSession::new(1, 0.0);
        session.start_round(0.0);
        let p = session.player.pos;
        for i in 0..6 {
            let angle = i as f32;
            session
                .enemies
                .push(enemy_at(p + crate::polar_to_cartesian(200.0, angle), Vec2::ZERO));
        }
        assert!(drive(&session, 16.0).focus);
    }

    #[test]
    fn test_idle_when_alone_at_center() {
        let mut session = GameSession::new(1, 0.0);
        session.start_round(0.0);
        let input = drive(&session, 16.0);
        assert!(!input.left && !input.right && !input.up && !input.down);
        assert!(!input.pulse && !input.dash && !input.focus && !input.shrink);
        assert!(input.idle_mode);
    }
}
