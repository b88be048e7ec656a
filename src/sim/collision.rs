//! Player-vs-enemy proximity tests and the pulse knockback
//!
//! The player is a circle of its effective size; an enemy's hitbox is a
//! circle of `0.6 × size`, a little smaller than what is drawn.

use glam::Vec2;

use super::state::Enemy;

/// Strict overlap: touching exactly at the threshold does not count
#[inline]
pub fn collides(player_pos: Vec2, player_radius: f32, enemy: &Enemy) -> bool {
    let distance = enemy.pos.distance(player_pos);
    distance < player_radius + enemy.hit_radius()
}

/// Index of the first enemy (in list order) touching the player
pub fn first_collision(player_pos: Vec2, player_radius: f32, enemies: &[Enemy]) -> Option<usize> {
    enemies
        .iter()
        .position(|enemy| collides(player_pos, player_radius, enemy))
}

/// Push every enemy within `radius` of `origin` away from it with
/// `force / distance`. Returns the positions of the enemies caught in the
/// blast (including any sitting exactly on the origin, which get no push).
pub fn pulse_knockback(enemies: &mut [Enemy], origin: Vec2, radius: f32, force: f32) -> Vec<Vec2> {
    let mut affected = Vec::new();
    for enemy in enemies.iter_mut() {
        let offset = enemy.pos - origin;
        let distance = offset.length();
        if distance < radius {
            if distance > 0.0 {
                enemy.vel += offset / distance * (force / distance);
            }
            affected.push(enemy.pos);
        }
    }
    affected
}
