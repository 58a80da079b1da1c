//! Fixed-rate simulation tick
//!
//! Core game loop that advances a session by one frame. Input is buffered by
//! the driver and applied at the start of the next tick.

use super::achievements::Achievements;
use super::collision;
use super::difficulty::{self, DifficultyProfile};
use super::effects;
use super::physics;
use super::spawner;
use super::state::{GamePhase, GameState, PowerUpKind, PrimaryAction};
use crate::highscores::ScoreStore;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump / tap: starts, jumps or restarts depending on phase
    pub primary: bool,
    /// Duck key went down
    pub duck_press: bool,
    /// Duck key came up
    pub duck_release: bool,
    /// Power-ups to activate, in the order requested
    pub activate: Vec<PowerUpKind>,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    /// Forget one-shot commands after they have been applied
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Collaborators injected into every tick
pub struct TickContext<'a> {
    /// Selected difficulty profile (read-only)
    pub profile: &'a DifficultyProfile,
    /// Process-wide achievements (survive restarts)
    pub achievements: &'a mut Achievements,
    /// Best-score storage
    pub scores: &'a mut dyn ScoreStore,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput, ctx: &mut TickContext<'_>) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Running;
                log::info!("Resumed");
            }
            _ => {}
        }
    }

    if input.primary {
        match state.phase.primary_action() {
            PrimaryAction::Start | PrimaryAction::Restart => state.start(ctx.profile),
            PrimaryAction::Jump => {
                physics::apply_jump(state);
            }
            PrimaryAction::Ignore => {}
        }
    }

    if input.duck_press {
        physics::apply_duck(state);
    }
    if input.duck_release {
        physics::release_duck(&mut state.character);
    }

    for &kind in &input.activate {
        effects::activate(state, kind);
    }

    // Don't tick if paused, idle or game over
    if state.phase != GamePhase::Running {
        return;
    }

    state.time_ticks += 1;

    physics::step(&mut state.character);
    spawner::update(state, ctx.profile);
    state.effects.decay();

    // Progression still settles on the tick that ends the run
    collision::resolve_obstacles(state, ctx.scores);
    collision::resolve_pickups(state);

    difficulty::recompute(state, ctx.profile);
    ctx.achievements.track(state);
}
