//! Dino Dash - An endless runner arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `tuning`: Data-driven game balance (difficulty profiles, achievements)
//! - `settings`: Player preferences
//! - `highscores`: Best score key/value store
//! - `platform`: Browser/native platform abstraction
//! - `audio`, `renderer`: Web Audio cues and Canvas 2D drawing (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod error;
pub mod highscores;
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{GameError, GameResult};
pub use highscores::{MemoryStore, ScoreStore};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
///
/// All geometry is expressed in a virtual 800x200 field; `FIELD_SCALE`
/// scales every length and speed uniformly.
pub mod consts {
    /// Uniform scale applied to lengths and speeds
    pub const FIELD_SCALE: f32 = 1.0;

    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 800.0 * FIELD_SCALE;
    pub const FIELD_HEIGHT: f32 = 200.0 * FIELD_SCALE;
    /// Ground line drawn under the runner
    pub const GROUND_LINE_Y: f32 = 190.0 * FIELD_SCALE;
    /// Ground dash pattern period (scroll offset wraps here)
    pub const GROUND_PATTERN: f32 = 20.0 * FIELD_SCALE;

    /// Character defaults
    pub const CHARACTER_X: f32 = 50.0 * FIELD_SCALE;
    pub const CHARACTER_GROUND_Y: f32 = 150.0 * FIELD_SCALE;
    pub const CHARACTER_WIDTH: f32 = 40.0 * FIELD_SCALE;
    pub const CHARACTER_HEIGHT: f32 = 40.0 * FIELD_SCALE;
    pub const CHARACTER_DUCK_HEIGHT: f32 = 25.0 * FIELD_SCALE;
    /// Ducking lowers the top edge so the feet stay on the ground line
    pub const CHARACTER_DUCK_OFFSET: f32 = 15.0 * FIELD_SCALE;
    pub const JUMP_VELOCITY: f32 = -12.0 * FIELD_SCALE;
    pub const GRAVITY: f32 = 0.6 * FIELD_SCALE;
    /// Obstacle hitbox inset on every side of the character box
    pub const HITBOX_MARGIN: f32 = 5.0 * FIELD_SCALE;

    /// Obstacle geometry
    pub const OBSTACLE_WIDTH: f32 = 20.0 * FIELD_SCALE;
    pub const OBSTACLE_NORMAL_Y: f32 = 160.0 * FIELD_SCALE;
    pub const OBSTACLE_NORMAL_HEIGHT: f32 = 30.0 * FIELD_SCALE;
    pub const OBSTACLE_TALL_Y: f32 = 120.0 * FIELD_SCALE;
    pub const OBSTACLE_TALL_HEIGHT: f32 = 70.0 * FIELD_SCALE;
    pub const TALL_OBSTACLE_CHANCE: f64 = 0.3;
    /// Lower bound on the obstacle spawn interval (ticks)
    pub const MIN_OBSTACLE_INTERVAL: u32 = 30;
    pub const OBSTACLE_PASS_POINTS: u64 = 10;

    /// Power-up pickup geometry and spawn cadence
    pub const PICKUP_Y: f32 = 140.0 * FIELD_SCALE;
    pub const PICKUP_SIZE: f32 = 25.0 * FIELD_SCALE;
    pub const PICKUP_DWELL_TICKS: u32 = 400;
    pub const PICKUP_SPAWN_CHANCE: f64 = 0.05;

    /// Effect durations (ticks)
    pub const POWER_UP_DURATION_TICKS: u32 = 300;
    pub const GRACE_SHIELD_TICKS: u32 = 120;

    /// Effect multipliers
    pub const SPEED_BOOST_FACTOR: f32 = 1.5;
    pub const SLOW_MO_FACTOR: f32 = 0.3;

    /// Progression
    pub const BASE_SPEED: f32 = 3.0;
    pub const SPEED_STEP: f32 = 0.5;
    pub const POINTS_PER_SPEED_STEP: u64 = 100;
    pub const POINTS_PER_LEVEL: u64 = 300;
    pub const POINTS_PER_NIGHT_CYCLE: u64 = 700;
    pub const BASE_LIVES: i32 = 3;

    /// Feedback timings consumed by the display layer
    pub const SCREEN_SHAKE_MS: i32 = 500;
    pub const BANNER_VISIBLE_MS: i32 = 3000;
    pub const BANNER_FADE_MS: i32 = 300;
}
