//! Timed power-up effects and inventory-gated activation

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GamePhase, GameState, PowerUpKind, SoundCue};
use crate::consts::POWER_UP_DURATION_TICKS;

/// A countdown effect; active while ticks remain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEffect {
    pub remaining_ticks: u32,
}

impl TimedEffect {
    pub fn with_ticks(ticks: u32) -> Self {
        Self {
            remaining_ticks: ticks,
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining_ticks > 0
    }

    /// Restart at a fixed duration (no stacking)
    pub fn activate(&mut self, ticks: u32) {
        self.remaining_ticks = ticks;
    }

    /// Count down one tick; deactivates on reaching zero
    pub fn decay(&mut self) {
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
    }
}

/// Speed-modifying effects. The shield lives on the character instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub speed_boost: TimedEffect,
    pub slow_mo: TimedEffect,
}

impl ActiveEffects {
    pub fn decay(&mut self) {
        self.speed_boost.decay();
        self.slow_mo.decay();
    }
}

/// Spend one power-up from the inventory.
///
/// Returns false (and changes nothing) unless the session is running and the
/// inventory holds at least one of `kind`.
pub fn activate(state: &mut GameState, kind: PowerUpKind) -> bool {
    if state.phase != GamePhase::Running || !state.inventory.take(kind) {
        return false;
    }

    match kind {
        PowerUpKind::SpeedBoost => state.effects.speed_boost.activate(POWER_UP_DURATION_TICKS),
        PowerUpKind::SlowMo => state.effects.slow_mo.activate(POWER_UP_DURATION_TICKS),
        PowerUpKind::Shield => state.character.shield.activate(POWER_UP_DURATION_TICKS),
    }

    log::debug!("Activated {:?} ({} left)", kind, state.inventory.count(kind));
    state.emit(GameEvent::Sound(SoundCue::PowerUp));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::{Difficulty, DifficultyProfile};

    fn running_state() -> GameState {
        let profile = DifficultyProfile::builtin(Difficulty::Normal);
        let mut state = GameState::new(7, &profile);
        state.start(&profile);
        state
    }

    #[test]
    fn test_decay_deactivates_at_zero() {
        let mut effect = TimedEffect::with_ticks(2);
        effect.decay();
        assert!(effect.is_active());
        effect.decay();
        assert!(!effect.is_active());
        effect.decay();
        assert_eq!(effect.remaining_ticks, 0);
    }

    #[test]
    fn test_activate_with_empty_inventory_is_noop() {
        let mut state = running_state();
        assert!(!activate(&mut state, PowerUpKind::SpeedBoost));
        assert!(!activate(&mut state, PowerUpKind::Shield));
        assert!(!state.effects.speed_boost.is_active());
        assert!(!state.character.has_shield());
        assert_eq!(state.inventory.count(PowerUpKind::SpeedBoost), 0);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_activate_consumes_and_sets_duration() {
        let mut state = running_state();
        state.inventory.add(PowerUpKind::SlowMo);
        state.inventory.add(PowerUpKind::Shield);

        assert!(activate(&mut state, PowerUpKind::SlowMo));
        assert_eq!(state.effects.slow_mo.remaining_ticks, POWER_UP_DURATION_TICKS);
        assert_eq!(state.inventory.count(PowerUpKind::SlowMo), 0);

        assert!(activate(&mut state, PowerUpKind::Shield));
        assert!(state.character.has_shield());
        assert_eq!(state.character.shield.remaining_ticks, POWER_UP_DURATION_TICKS);
    }

    #[test]
    fn test_reactivation_resets_without_stacking() {
        let mut state = running_state();
        state.inventory.add(PowerUpKind::SpeedBoost);
        state.inventory.add(PowerUpKind::SpeedBoost);

        activate(&mut state, PowerUpKind::SpeedBoost);
        for _ in 0..50 {
            state.effects.decay();
        }
        activate(&mut state, PowerUpKind::SpeedBoost);
        assert_eq!(
            state.effects.speed_boost.remaining_ticks,
            POWER_UP_DURATION_TICKS
        );
    }

    #[test]
    fn test_activate_blocked_when_paused() {
        let mut state = running_state();
        state.inventory.add(PowerUpKind::SpeedBoost);
        state.phase = GamePhase::Paused;
        assert!(!activate(&mut state, PowerUpKind::SpeedBoost));
        assert_eq!(state.inventory.count(PowerUpKind::SpeedBoost), 1);
    }
}
