//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One uniform tick per call, no time delta
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod achievements;
pub mod collision;
pub mod difficulty;
pub mod effects;
pub mod physics;
pub mod spawner;
pub mod state;
pub mod tick;

pub use achievements::{Achievement, Achievements, Metric};
pub use collision::{Aabb, ObstacleHit};
pub use difficulty::{Difficulty, DifficultyProfile};
pub use effects::{ActiveEffects, TimedEffect};
pub use state::{
    Character, GameEvent, GamePhase, GameState, Inventory, Obstacle, ObstacleKind, PowerUp,
    PowerUpKind, PrimaryAction, SoundCue,
};
pub use tick::{TickContext, TickInput, tick};
