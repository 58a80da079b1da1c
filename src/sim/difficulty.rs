//! Difficulty profiles and score-driven progression
//!
//! Everything here is a pure function of score, level and the selected
//! profile, so the formulas can be tested without running a session.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::effects::ActiveEffects;
use super::state::{GameEvent, GameState};
use crate::consts::*;
use crate::error::GameError;

/// Named difficulty levels selectable from the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Extreme,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Extreme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Extreme => "extreme",
        }
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            "extreme" => Ok(Difficulty::Extreme),
            _ => Err(GameError::UnknownDifficulty {
                name: s.to_string(),
            }),
        }
    }
}

/// Balance parameters for one difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Multiplier on the score-derived base speed
    pub speed_multiplier: f32,
    /// Base obstacle spawn interval in ticks (shrinks with level)
    pub obstacle_frequency: u32,
    /// Added to the base life count (may be negative)
    pub lives_bonus: i32,
}

impl DifficultyProfile {
    /// Built-in profile for a difficulty level
    pub fn builtin(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                speed_multiplier: 0.7,
                obstacle_frequency: 150,
                lives_bonus: 2,
            },
            Difficulty::Normal => Self {
                speed_multiplier: 1.0,
                obstacle_frequency: 120,
                lives_bonus: 0,
            },
            Difficulty::Hard => Self {
                speed_multiplier: 1.3,
                obstacle_frequency: 90,
                lives_bonus: -1,
            },
            Difficulty::Extreme => Self {
                speed_multiplier: 1.6,
                obstacle_frequency: 60,
                lives_bonus: -2,
            },
        }
    }

    /// Lives at session start; never below one
    pub fn starting_lives(&self) -> u8 {
        BASE_LIVES
            .saturating_add(self.lives_bonus)
            .clamp(1, u8::MAX as i32) as u8
    }
}

/// Level for a score: 1 at score 0, +1 every 300 points
pub fn level_for_score(score: u64) -> u32 {
    (score / POINTS_PER_LEVEL) as u32 + 1
}

/// Base scroll speed for a score, before the profile multiplier
pub fn base_speed_for_score(score: u64) -> f32 {
    (BASE_SPEED + (score / POINTS_PER_SPEED_STEP) as f32 * SPEED_STEP) * FIELD_SCALE
}

/// Final per-tick displacement for the whole field.
///
/// Order matters: profile multiplier, then boost, then slow-mo last.
pub fn effective_speed(base: f32, multiplier: f32, effects: &ActiveEffects) -> f32 {
    let mut speed = base * multiplier;
    if effects.speed_boost.is_active() {
        speed *= SPEED_BOOST_FACTOR;
    }
    if effects.slow_mo.is_active() {
        speed *= SLOW_MO_FACTOR;
    }
    speed
}

/// Ticks between obstacle spawns at a level, floored at `MIN_OBSTACLE_INTERVAL`
pub fn obstacle_spawn_threshold(frequency: u32, level: u32) -> u32 {
    let interval = i64::from(frequency) - i64::from(level) * 10;
    interval.max(i64::from(MIN_OBSTACLE_INTERVAL)) as u32
}

/// Fraction of the way to the next level (0.0..1.0)
pub fn progress_fraction(score: u64) -> f32 {
    (score % POINTS_PER_LEVEL) as f32 / POINTS_PER_LEVEL as f32
}

/// Night mode covers every odd 700-point band
pub fn is_night(score: u64) -> bool {
    (score / POINTS_PER_NIGHT_CYCLE) % 2 == 1
}

/// Recompute level, speeds and night mode from the current score
pub fn recompute(state: &mut GameState, profile: &DifficultyProfile) {
    state.level = level_for_score(state.score);
    state.base_speed = base_speed_for_score(state.score);
    state.speed = effective_speed(state.base_speed, profile.speed_multiplier, &state.effects);

    let night = is_night(state.score);
    if night != state.night_mode {
        state.night_mode = night;
        log::debug!("Night mode {}", if night { "on" } else { "off" });
        state.emit(GameEvent::NightMode(night));
    }
}
