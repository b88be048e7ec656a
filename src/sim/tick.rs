//! Fixed-step simulation tick
//!
//! One call advances a round by one frame. Phase order within a tick:
//! abilities → movement → spawner → enemies → collision → particles → shake.

use glam::Vec2;
use rand::seq::IndexedRandom;

use super::ability::AbilityKind;
use super::collision::{first_collision, pulse_knockback};
use super::particle;
use super::spawn::{SpawnContext, spawn_enemy};
use super::state::{Enemy, GameEvent, GameSession, Pattern, palette};
use super::autopilot;
use crate::consts::*;

/// Player commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held movement directions
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Dash modifier (held)
    pub dash: bool,
    /// Ability triggers (pressed this frame)
    pub focus: bool,
    pub pulse: bool,
    pub shrink: bool,
    /// Idle/demo mode - the autopilot plays
    pub idle_mode: bool,
}

impl TickInput {
    /// Unit-per-axis movement direction (not normalized, like the keyboard)
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i32 - neg as i32) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Advance the session by one tick at session time `now_ms`
pub fn tick(session: &mut GameSession, input: &TickInput, now_ms: f64) {
    // Nothing moves between rounds or while paused
    if !session.active || session.paused {
        return;
    }

    let input = if input.idle_mode {
        autopilot::drive(session, now_ms)
    } else {
        input.clone()
    };

    session.time_ticks += 1;
    session.update_score(now_ms);

    update_abilities(session, now_ms);
    apply_ability_triggers(session, &input, now_ms);
    move_player(session, &input, now_ms);
    spawn_step(session, now_ms);
    let time_factor = session.time_factor();
    advance_enemies(&mut session.enemies, time_factor);
    check_collisions(session);
    particle::update(&mut session.particles);

    session.screen_shake = (session.screen_shake - 1.0).max(0.0);
}

/// Expire timed effects and refill pulse charges
fn update_abilities(session: &mut GameSession, now_ms: f64) {
    for kind in session.abilities.update(now_ms) {
        if kind == AbilityKind::Shrink {
            session.player.size = session.player.base_size;
        }
        session.events.push(GameEvent::AbilityExpired(kind));
    }
}

fn apply_ability_triggers(session: &mut GameSession, input: &TickInput, now_ms: f64) {
    if input.focus && session.abilities.focus.try_activate(now_ms, true) {
        session.events.push(GameEvent::AbilityUsed(AbilityKind::Focus));
    }

    if input.pulse && session.abilities.try_pulse(now_ms) {
        let origin = session.player.pos;
        let affected = pulse_knockback(&mut session.enemies, origin, PULSE_RADIUS, PULSE_FORCE);
        if session.particles_enabled {
            for pos in affected {
                particle::emit_burst(
                    &mut session.particles,
                    &mut session.rng,
                    pos,
                    PULSE_PARTICLES_PER_ENEMY,
                    palette::CYAN,
                );
            }
        }
        session.shake(PULSE_SHAKE);
        session.events.push(GameEvent::AbilityUsed(AbilityKind::Pulse));
    }

    if input.shrink && session.abilities.shrink.try_activate(now_ms, true) {
        session.player.size = session.player.base_size * 0.5;
        session.events.push(GameEvent::AbilityUsed(AbilityKind::Shrink));
    }
}

/// Held-key movement; a ready dash swaps in the dash speed for this tick
fn move_player(session: &mut GameSession, input: &TickInput, now_ms: f64) {
    let mut speed = PLAYER_SPEED;
    if input.dash && session.abilities.dash.try_activate(now_ms, true) {
        speed = DASH_SPEED;
        session.shake(DASH_SHAKE);
        session.events.push(GameEvent::AbilityUsed(AbilityKind::Dash));
    }

    session.player.move_by(input.direction() * speed);
    session.player.record_trail(now_ms);
}

/// Spawn on the score-driven cadence, then rotate the pattern on its timer
fn spawn_step(session: &mut GameSession, now_ms: f64) {
    let interval = session.spawn_interval_ms();
    let due = session
        .last_spawn_ms
        .is_none_or(|last| now_ms - last > interval);
    if due {
        let ctx = SpawnContext {
            pattern: session.pattern,
            player_pos: session.player.pos,
            difficulty: session.difficulty,
            now_ms,
            spawn_index: session.spawn_count,
        };
        let enemy = spawn_enemy(&ctx, &mut session.rng);
        session.enemies.push(enemy);
        session.last_spawn_ms = Some(now_ms);
        session.spawn_count += 1;
    }

    if now_ms - session.pattern_timer_ms > PATTERN_SWITCH_MS {
        let pattern = *Pattern::ALL
            .choose(&mut session.rng)
            .unwrap_or(&Pattern::Random);
        session.pattern = pattern;
        session.pattern_timer_ms = now_ms;
        session.events.push(GameEvent::PatternChanged(pattern));
        log::debug!("Pattern switched to {:?}", pattern);
    }
}

/// Move every enemy, then cull the ones that left the play field
pub fn advance_enemies(enemies: &mut Vec<Enemy>, time_factor: f32) {
    for enemy in enemies.iter_mut() {
        enemy.advance(time_factor);
    }
    enemies.retain(|e| !e.is_off_screen());
}

/// First touch ends the round
fn check_collisions(session: &mut GameSession) {
    if first_collision(session.player.pos, session.player.size, &session.enemies).is_none() {
        return;
    }

    let score = session.score;
    let new_best = score > session.high_score;
    if new_best {
        session.high_score = score;
    }
    session.active = false;
    session.events.push(GameEvent::RoundEnded { score, new_best });
    log::info!(
        "Round over after {:.2}s ({} enemies spawned){}",
        score,
        session.spawn_count,
        if new_best { " - new best!" } else { "" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen_center;
    use crate::sim::state::ShapeKind;
    use proptest::prelude::*;

    fn enemy(pos: Vec2, vel: Vec2, size: f32) -> Enemy {
        Enemy {
            pos,
            vel,
            shape: ShapeKind::Hexagon,
            size,
            color: palette::ORANGE,
            rotation: 0.0,
            rotation_speed: 0.0,
            pulse_phase: 0.0,
            dimension_phase: 0.0,
        }
    }

    /// Session with a round started at t=0 and spawning pushed far into the future
    fn quiet_session() -> GameSession {
        let mut session = GameSession::new(42, 0.0);
        session.start_round(0.0);
        session.last_spawn_ms = Some(1e12);
        session.drain_events();
        session
    }

    fn at_tick(n: u64) -> f64 {
        n as f64 * FRAME_MS
    }

    #[test]
    fn test_tick_noop_when_inactive_or_paused() {
        let mut session = GameSession::new(1, 0.0);
        tick(&mut session, &TickInput::default(), 100.0);
        assert_eq!(session.time_ticks, 0);
        assert!(session.enemies.is_empty());

        session.start_round(0.0);
        session.paused = true;
        tick(&mut session, &TickInput::default(), 100.0);
        assert_eq!(session.time_ticks, 0);
        assert_eq!(session.score, 0.0);
    }

    #[test]
    fn test_head_on_collision_scenario() {
        let mut session = GameSession::new(42, 0.0);
        session.start_round(0.0);
        let p = session.player.pos;
        session
            .enemies
            .push(enemy(p + Vec2::new(200.0, 0.0), Vec2::new(-5.0, 0.0), 40.0));

        let mut ended_at = None;
        for n in 1..=40 {
            tick(&mut session, &TickInput::default(), at_tick(n));
            if !session.active {
                ended_at = Some(n);
                break;
            }
        }

        assert_eq!(ended_at, Some(33));
        assert!((session.score - 33.0 / 60.0).abs() < 1e-9);
        assert!(session.events.contains(&GameEvent::RoundEnded {
            score: session.score,
            new_best: true
        }));
        assert_eq!(session.high_score, session.score);
    }

    #[test]
    fn test_score_frozen_after_round_end() {
        let mut session = quiet_session();
        let p = session.player.pos;
        session.enemies.push(enemy(p, Vec2::ZERO, 20.0));
        tick(&mut session, &TickInput::default(), 500.0);
        assert!(!session.active);
        assert_eq!(session.score, 0.5);
        tick(&mut session, &TickInput::default(), 5000.0);
        assert_eq!(session.score, 0.5);
    }

    #[test]
    fn test_high_score_kept_when_not_beaten() {
        let mut session = quiet_session();
        session.high_score = 40.0;
        let p = session.player.pos;
        session.enemies.push(enemy(p, Vec2::ZERO, 20.0));
        tick(&mut session, &TickInput::default(), 30_000.0);
        assert_eq!(session.high_score, 40.0);
        assert!(session.events.contains(&GameEvent::RoundEnded {
            score: 30.0,
            new_best: false
        }));
    }

    #[test]
    fn test_high_score_updated_when_beaten() {
        let mut session = quiet_session();
        session.high_score = 40.0;
        let p = session.player.pos;
        session.enemies.push(enemy(p, Vec2::ZERO, 20.0));
        tick(&mut session, &TickInput::default(), 45_200.0);
        assert!((session.high_score - 45.2).abs() < 1e-9);
    }

    #[test]
    fn test_focus_halves_enemy_motion() {
        let mut session = quiet_session();
        session
            .enemies
            .push(enemy(Vec2::new(100.0, 100.0), Vec2::new(4.0, 2.0), 20.0));
        let focus = TickInput {
            focus: true,
            ..Default::default()
        };
        tick(&mut session, &focus, at_tick(1));
        assert!(session.abilities.focus_active());
        assert_eq!(session.enemies[0].pos, Vec2::new(102.0, 101.0));
        assert!((session.enemies[0].pulse_phase - PULSE_PHASE_STEP * 0.5).abs() < 1e-6);

        // Expires 3000ms after the trigger
        tick(&mut session, &TickInput::default(), at_tick(1) + FOCUS_DURATION_MS);
        assert!(!session.abilities.focus_active());
        assert_eq!(session.enemies[0].pos, Vec2::new(106.0, 103.0));
    }

    #[test]
    fn test_pulse_without_charges_does_nothing() {
        let mut session = quiet_session();
        let p = session.player.pos;
        session
            .enemies
            .push(enemy(p + Vec2::new(100.0, 0.0), Vec2::ZERO, 20.0));
        // Drained 4 s ago: cooldown has passed but no charge is back yet
        let last_use = at_tick(1) - 4000.0;
        session.abilities.pulse.cooldown.restart(last_use);
        session.abilities.pulse_charges.charges = 0;
        let pulse = TickInput {
            pulse: true,
            ..Default::default()
        };
        tick(&mut session, &pulse, at_tick(1));
        assert_eq!(session.enemies[0].vel, Vec2::ZERO);
        assert!(session.particles.is_empty());
        assert_eq!(session.abilities.pulse.cooldown.last_used(), Some(last_use));
        assert_eq!(session.abilities.pulse_charges.charges, 0);
        assert_eq!(session.screen_shake, 0.0);
    }

    #[test]
    fn test_pulse_knocks_back_and_sparks() {
        let mut session = quiet_session();
        let p = session.player.pos;
        session
            .enemies
            .push(enemy(p + Vec2::new(100.0, 0.0), Vec2::ZERO, 20.0));
        session
            .enemies
            .push(enemy(p + Vec2::new(0.0, 300.0), Vec2::ZERO, 20.0));
        let pulse = TickInput {
            pulse: true,
            ..Default::default()
        };
        tick(&mut session, &pulse, at_tick(1));
        // 200 / 100 = 2 units/tick along +x, applied before the move
        assert!((session.enemies[0].vel - Vec2::new(2.0, 0.0)).length() < 1e-5);
        assert_eq!(session.enemies[1].vel, Vec2::ZERO);
        assert_eq!(session.particles.len(), PULSE_PARTICLES_PER_ENEMY);
        assert_eq!(session.abilities.pulse_charges.charges, PULSE_MAX_CHARGES - 1);
        assert_eq!(session.screen_shake, PULSE_SHAKE - 1.0);
    }

    #[test]
    fn test_shrink_window_is_exact() {
        let mut session = quiet_session();
        let shrink = TickInput {
            shrink: true,
            ..Default::default()
        };
        tick(&mut session, &shrink, 1000.0);
        assert_eq!(session.player.size, PLAYER_SIZE * 0.5);
        tick(&mut session, &TickInput::default(), 2999.9);
        assert_eq!(session.player.size, PLAYER_SIZE * 0.5);
        tick(&mut session, &TickInput::default(), 3000.0);
        assert_eq!(session.player.size, PLAYER_SIZE);
        assert!(session
            .events
            .contains(&GameEvent::AbilityExpired(AbilityKind::Shrink)));
    }

    #[test]
    fn test_dash_after_pulse_resets_shake() {
        let mut session = quiet_session();
        let pulse = TickInput {
            pulse: true,
            ..Default::default()
        };
        tick(&mut session, &pulse, at_tick(1));
        assert_eq!(session.screen_shake, PULSE_SHAKE - 1.0);
        let dash = TickInput {
            left: true,
            dash: true,
            ..Default::default()
        };
        tick(&mut session, &dash, at_tick(2));
        assert_eq!(session.screen_shake, DASH_SHAKE - 1.0);
    }

    #[test]
    fn test_dash_moves_far_and_shakes() {
        let mut session = quiet_session();
        let start = session.player.pos;
        let dash_right = TickInput {
            right: true,
            dash: true,
            ..Default::default()
        };
        tick(&mut session, &dash_right, at_tick(1));
        assert_eq!(session.player.pos, start + Vec2::new(DASH_SPEED, 0.0));
        assert_eq!(session.screen_shake, DASH_SHAKE - 1.0);

        // Still cooling down: normal speed
        tick(&mut session, &dash_right, at_tick(2));
        assert_eq!(
            session.player.pos,
            start + Vec2::new(DASH_SPEED + PLAYER_SPEED, 0.0)
        );
    }

    #[test]
    fn test_shake_decays_to_zero() {
        let mut session = quiet_session();
        session.screen_shake = 2.0;
        for n in 1..=5 {
            tick(&mut session, &TickInput::default(), at_tick(n));
        }
        assert_eq!(session.screen_shake, 0.0);
    }

    #[test]
    fn test_spawn_cadence() {
        let mut session = GameSession::new(5, 0.0);
        session.start_round(0.0);
        tick(&mut session, &TickInput::default(), 10.0);
        assert_eq!(session.enemies.len(), 1);
        // Interval at ~1s of survival is 1000 - 10 * score
        tick(&mut session, &TickInput::default(), 995.0);
        assert_eq!(session.spawn_count, 1);
        tick(&mut session, &TickInput::default(), 1005.0);
        assert_eq!(session.spawn_count, 2);
    }

    #[test]
    fn test_pattern_switches_on_timer() {
        let mut session = quiet_session();
        tick(&mut session, &TickInput::default(), PATTERN_SWITCH_MS);
        assert_eq!(session.pattern_timer_ms, 0.0);
        tick(&mut session, &TickInput::default(), PATTERN_SWITCH_MS + 1.0);
        assert_eq!(session.pattern_timer_ms, PATTERN_SWITCH_MS + 1.0);
        assert!(session
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::PatternChanged(_))));
    }

    #[test]
    fn test_offscreen_enemies_culled() {
        let mut enemies = vec![
            enemy(Vec2::new(-99.0, 400.0), Vec2::new(-2.0, 0.0), 20.0),
            enemy(Vec2::new(600.0, 400.0), Vec2::new(-2.0, 0.0), 20.0),
        ];
        advance_enemies(&mut enemies, 1.0);
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].pos, Vec2::new(598.0, 400.0));
    }

    #[test]
    fn test_idle_mode_steers_player() {
        let mut session = quiet_session();
        let p = session.player.pos;
        session
            .enemies
            .push(enemy(p + Vec2::new(150.0, 0.0), Vec2::new(-1.0, 0.0), 20.0));
        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        tick(&mut session, &idle, at_tick(1));
        assert!(session.player.pos.x < screen_center().x);
    }

    proptest! {
        #[test]
        fn prop_linear_motion(
            x in 100.0f32..1100.0,
            y in 100.0f32..700.0,
            vx in -3.0f32..3.0,
            vy in -3.0f32..3.0,
            n in 1usize..30,
        ) {
            let start = Vec2::new(x, y);
            let vel = Vec2::new(vx, vy);
            let mut enemies = vec![enemy(start, vel, 20.0)];
            for _ in 0..n {
                advance_enemies(&mut enemies, 1.0);
            }
            prop_assert_eq!(enemies.len(), 1);
            let expected = start + vel * n as f32;
            prop_assert!((enemies[0].pos - expected).length() < 1e-2);
        }

        #[test]
        fn prop_score_tracks_elapsed_time(start in 0.0f64..1e6, elapsed in 0.0f64..1e5) {
            let mut session = quiet_session();
            session.round_start_ms = start;
            session.pattern_timer_ms = start;
            tick(&mut session, &TickInput::default(), start + elapsed);
            prop_assert!((session.score - elapsed / 1000.0).abs() < 1e-6);
            prop_assert!((session.difficulty - (1.0 + session.score / 30.0)).abs() < 1e-9);
        }
    }
}
