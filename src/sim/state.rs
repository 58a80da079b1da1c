//! Game state and core simulation types
//!
//! A `GameState` is one play session. It exclusively owns every entity list,
//! the inventory and the active effects; nothing here is shared across sessions.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::difficulty::{self, DifficultyProfile};
use super::effects::{ActiveEffects, TimedEffect};
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first primary action
    Ready,
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// What the primary action (jump key / tap) means in each phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryAction {
    /// Begin the first run
    Start,
    /// Leave the ground
    Jump,
    /// Begin a fresh run after game over
    Restart,
    /// Nothing happens (paused)
    Ignore,
}

impl GamePhase {
    pub fn primary_action(self) -> PrimaryAction {
        match self {
            GamePhase::Ready => PrimaryAction::Start,
            GamePhase::Running => PrimaryAction::Jump,
            GamePhase::Paused => PrimaryAction::Ignore,
            GamePhase::GameOver => PrimaryAction::Restart,
        }
    }
}

/// The player's runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    /// Top-left corner; x never changes
    pub pos: Vec2,
    pub size: Vec2,
    pub vel_y: f32,
    pub jumping: bool,
    pub ducking: bool,
    pub shield: TimedEffect,
}

impl Default for Character {
    fn default() -> Self {
        Self {
            pos: Vec2::new(CHARACTER_X, CHARACTER_GROUND_Y),
            size: Vec2::new(CHARACTER_WIDTH, CHARACTER_HEIGHT),
            vel_y: 0.0,
            jumping: false,
            ducking: false,
            shield: TimedEffect::default(),
        }
    }
}

impl Character {
    pub fn has_shield(&self) -> bool {
        self.shield.is_active()
    }

    pub fn is_grounded(&self) -> bool {
        !self.jumping
    }

    /// Full bounding box (used for pickups)
    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Forgiving hitbox used against obstacles
    pub fn hitbox(&self) -> Aabb {
        self.bounds().inset(HITBOX_MARGIN)
    }
}

/// Obstacle categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleKind {
    #[default]
    Normal,
    Tall,
}

impl ObstacleKind {
    /// Top edge and height for this category
    pub fn vertical_extent(&self) -> (f32, f32) {
        match self {
            ObstacleKind::Normal => (OBSTACLE_NORMAL_Y, OBSTACLE_NORMAL_HEIGHT),
            ObstacleKind::Tall => (OBSTACLE_TALL_Y, OBSTACLE_TALL_HEIGHT),
        }
    }
}

/// An obstacle entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    pub fn is_past_left_edge(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    SpeedBoost,
    Shield,
    SlowMo,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::SpeedBoost,
        PowerUpKind::Shield,
        PowerUpKind::SlowMo,
    ];
}

/// A power-up pickup on the field (distinct from the inventory)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
}

impl PowerUp {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    pub fn is_past_left_edge(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// Collected power-ups waiting to be activated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub speed_boost: u32,
    pub shield: u32,
    pub slow_mo: u32,
}

impl Inventory {
    fn slot(&mut self, kind: PowerUpKind) -> &mut u32 {
        match kind {
            PowerUpKind::SpeedBoost => &mut self.speed_boost,
            PowerUpKind::Shield => &mut self.shield,
            PowerUpKind::SlowMo => &mut self.slow_mo,
        }
    }

    pub fn count(&self, kind: PowerUpKind) -> u32 {
        match kind {
            PowerUpKind::SpeedBoost => self.speed_boost,
            PowerUpKind::Shield => self.shield,
            PowerUpKind::SlowMo => self.slow_mo,
        }
    }

    pub fn add(&mut self, kind: PowerUpKind) {
        *self.slot(kind) += 1;
    }

    /// Remove one item; false if none were held
    pub fn take(&mut self, kind: PowerUpKind) -> bool {
        let slot = self.slot(kind);
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }
}

/// Named sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Jump,
    Hit,
    Collect,
    PowerUp,
    Shield,
    Achievement,
}

/// Feedback emitted during a tick for the presentation layer.
///
/// Events are fire-and-forget: dropping them never affects the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundCue),
    ScreenShake,
    /// Night mode switched on (`true`) or off
    NightMode(bool),
    AchievementUnlocked {
        id: String,
        name: String,
        description: String,
    },
    LifeLost { lives_left: u8 },
    GameOver { score: u64, new_best: bool },
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawner RNG
    rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    pub level: u32,
    pub lives: u8,
    /// Score-derived speed before multipliers
    pub base_speed: f32,
    /// Effective field speed after profile and effects
    pub speed: f32,
    pub night_mode: bool,
    pub character: Character,
    /// Obstacles in spawn order (oldest first)
    pub obstacles: Vec<Obstacle>,
    /// Pickups in spawn order (oldest first)
    pub pickups: Vec<PowerUp>,
    pub inventory: Inventory,
    pub effects: ActiveEffects,
    /// Ticks since the last obstacle spawn
    pub obstacle_timer: u32,
    /// Ticks since the last pickup spawn
    pub power_up_timer: u32,
    /// Ground pattern scroll offset (0..GROUND_PATTERN)
    pub ground_offset: f32,
    /// Simulation tick counter for the current session
    pub time_ticks: u64,
    /// Feedback accumulated since the last drain
    #[serde(skip)]
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create an idle session waiting for the first primary action
    pub fn new(seed: u64, profile: &DifficultyProfile) -> Self {
        let base_speed = difficulty::base_speed_for_score(0);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Ready,
            score: 0,
            level: 1,
            lives: profile.starting_lives(),
            base_speed,
            speed: base_speed * profile.speed_multiplier,
            night_mode: false,
            character: Character::default(),
            obstacles: Vec::new(),
            pickups: Vec::new(),
            inventory: Inventory::default(),
            effects: ActiveEffects::default(),
            obstacle_timer: 0,
            power_up_timer: 0,
            ground_offset: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Begin a fresh run. Everything session-scoped is reset; the RNG keeps
    /// running so consecutive runs differ.
    pub fn start(&mut self, profile: &DifficultyProfile) {
        let rng = self.rng.clone();
        let events = std::mem::take(&mut self.events);
        let was_night = self.night_mode;
        *self = Self::new(self.seed, profile);
        self.rng = rng;
        self.events = events;
        self.phase = GamePhase::Running;
        // Runs always start in day mode
        if was_night {
            self.emit(GameEvent::NightMode(false));
        }
        log::info!("Run started with {} lives", self.lives);
    }

    /// Reset lives for a (possibly new) profile
    pub fn reset_lives(&mut self, profile: &DifficultyProfile) {
        self.lives = profile.starting_lives();
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Fraction of the way to the next level
    pub fn progress(&self) -> f32 {
        difficulty::progress_fraction(self.score)
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all feedback emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
