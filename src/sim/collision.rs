//! Collision detection and outcome resolution
//!
//! Axis-aligned boxes only. Each sweep resolves at most one contact per tick,
//! scanning newest entities first, and removes by index after the scan so the
//! list is never mutated while it is being iterated.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GamePhase, GameState, SoundCue};
use crate::consts::GRACE_SHIELD_TICKS;
use crate::highscores::{self, ScoreStore};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Shrink by `margin` on every side
    pub fn inset(&self, margin: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(margin),
            max: self.max - Vec2::splat(margin),
        }
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Outcome of the obstacle sweep for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleHit {
    None,
    /// Shield absorbed the hit and the obstacle was destroyed
    Shielded,
    /// A life was lost; the run continues under a grace shield
    LifeLost,
    /// The last life was lost
    GameOver,
}

/// Check the character against obstacles and apply the outcome
pub fn resolve_obstacles(state: &mut GameState, scores: &mut dyn ScoreStore) -> ObstacleHit {
    let hitbox = state.character.hitbox();
    let Some(idx) = state
        .obstacles
        .iter()
        .rposition(|o| hitbox.overlaps(&o.bounds()))
    else {
        return ObstacleHit::None;
    };

    if state.character.has_shield() {
        state.character.shield.remaining_ticks = 0;
        let obstacle = state.obstacles.remove(idx);
        log::debug!("Shield absorbed obstacle {}", obstacle.id);
        state.emit(GameEvent::Sound(SoundCue::Shield));
        state.emit(GameEvent::ScreenShake);
        ObstacleHit::Shielded
    } else {
        lose_life(state, scores)
    }
}

/// Take one life; ends the run at zero
pub fn lose_life(state: &mut GameState, scores: &mut dyn ScoreStore) -> ObstacleHit {
    state.lives = state.lives.saturating_sub(1);
    state.emit(GameEvent::Sound(SoundCue::Hit));
    state.emit(GameEvent::ScreenShake);

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        let new_best = highscores::record_best(scores, state.score);
        log::info!(
            "Game over: score {} level {}{}",
            state.score,
            state.level,
            if new_best { " (new best!)" } else { "" }
        );
        state.emit(GameEvent::GameOver {
            score: state.score,
            new_best,
        });
        ObstacleHit::GameOver
    } else {
        state.character.shield.activate(GRACE_SHIELD_TICKS);
        state.emit(GameEvent::LifeLost {
            lives_left: state.lives,
        });
        ObstacleHit::LifeLost
    }
}

/// Collect at most one overlapping pickup into the inventory
pub fn resolve_pickups(state: &mut GameState) -> bool {
    let bounds = state.character.bounds();
    let Some(idx) = state
        .pickups
        .iter()
        .rposition(|p| bounds.overlaps(&p.bounds()))
    else {
        return false;
    };

    let pickup = state.pickups.remove(idx);
    state.inventory.add(pickup.kind);
    log::debug!("Collected {:?}", pickup.kind);
    state.emit(GameEvent::Sound(SoundCue::Collect));
    true
}
