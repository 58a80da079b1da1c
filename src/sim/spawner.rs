//! Timer-driven obstacle and pickup spawning plus field scrolling

use glam::Vec2;
use rand::Rng;

use super::difficulty::{self, DifficultyProfile};
use super::state::{GameState, Obstacle, ObstacleKind, PowerUp, PowerUpKind};
use crate::consts::*;

/// Spawn, scroll and retire field entities for one tick.
///
/// Returns the number of obstacles that left the field this tick.
pub fn update(state: &mut GameState, profile: &DifficultyProfile) -> usize {
    update_obstacle_timer(state, profile);
    update_power_up_timer(state);

    let speed =
        difficulty::effective_speed(state.base_speed, profile.speed_multiplier, &state.effects);
    scroll(state, speed)
}

fn update_obstacle_timer(state: &mut GameState, profile: &DifficultyProfile) {
    state.obstacle_timer += 1;
    let threshold = difficulty::obstacle_spawn_threshold(profile.obstacle_frequency, state.level);
    if state.obstacle_timer > threshold {
        spawn_obstacle(state);
        state.obstacle_timer = 0;
    }
}

fn update_power_up_timer(state: &mut GameState) {
    state.power_up_timer += 1;
    // Each tick past the dwell is an independent roll until one succeeds
    if state.power_up_timer > PICKUP_DWELL_TICKS
        && state.rng_mut().random_bool(PICKUP_SPAWN_CHANCE)
    {
        spawn_pickup(state);
        state.power_up_timer = 0;
    }
}

/// Add one obstacle at the right edge
pub fn spawn_obstacle(state: &mut GameState) {
    let kind = if state.rng_mut().random_bool(TALL_OBSTACLE_CHANCE) {
        ObstacleKind::Tall
    } else {
        ObstacleKind::Normal
    };
    let (y, height) = kind.vertical_extent();
    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        kind,
        pos: Vec2::new(FIELD_WIDTH, y),
        size: Vec2::new(OBSTACLE_WIDTH, height),
    });
    log::debug!("Spawned {:?} obstacle {}", kind, id);
}

/// Add one pickup of a uniformly random kind at the right edge
pub fn spawn_pickup(state: &mut GameState) {
    let kind = PowerUpKind::ALL[state.rng_mut().random_range(0..PowerUpKind::ALL.len())];
    let id = state.next_entity_id();
    state.pickups.push(PowerUp {
        id,
        kind,
        pos: Vec2::new(FIELD_WIDTH, PICKUP_Y),
        size: Vec2::splat(PICKUP_SIZE),
    });
    log::debug!("Spawned {:?} pickup {}", kind, id);
}

/// Move everything left by `speed` and drop what has left the field
fn scroll(state: &mut GameState, speed: f32) -> usize {
    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= speed;
    }
    for pickup in &mut state.pickups {
        pickup.pos.x -= speed;
    }
    state.ground_offset = (state.ground_offset + speed) % GROUND_PATTERN;

    let before = state.obstacles.len();
    state.obstacles.retain(|o| !o.is_past_left_edge());
    let passed = before - state.obstacles.len();
    state.score += passed as u64 * OBSTACLE_PASS_POINTS;

    state.pickups.retain(|p| !p.is_past_left_edge());
    passed
}
