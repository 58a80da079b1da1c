//! Character physics: jump, duck and gravity integration

use super::state::{Character, GameEvent, GamePhase, GameState, SoundCue};
use crate::consts::*;

/// Launch the character if it is standing on the ground.
///
/// Only the `Running` phase jumps; start/restart are dispatched by the tick.
pub fn apply_jump(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Running || !state.character.is_grounded() {
        return false;
    }
    // Jumps launch from the standing baseline, ducked or not
    state.character.pos.y = CHARACTER_GROUND_Y;
    state.character.jumping = true;
    state.character.vel_y = JUMP_VELOCITY;
    state.emit(GameEvent::Sound(SoundCue::Jump));
    true
}

/// Crouch while grounded
pub fn apply_duck(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Running || !state.character.is_grounded() {
        return false;
    }
    let character = &mut state.character;
    character.ducking = true;
    character.size.y = CHARACTER_DUCK_HEIGHT;
    character.pos.y = CHARACTER_GROUND_Y + CHARACTER_DUCK_OFFSET;
    true
}

/// Stand back up. Always honoured so a release is never lost mid-air.
pub fn release_duck(character: &mut Character) {
    character.ducking = false;
    character.size.y = CHARACTER_HEIGHT;
    if character.is_grounded() {
        character.pos.y = CHARACTER_GROUND_Y;
    }
}

/// Advance the character by one tick
pub fn step(character: &mut Character) {
    if character.jumping {
        character.pos.y += character.vel_y;
        character.vel_y += GRAVITY;

        if character.pos.y >= CHARACTER_GROUND_Y {
            character.pos.y = CHARACTER_GROUND_Y;
            character.jumping = false;
            character.vel_y = 0.0;
        }
    }

    if !character.jumping {
        character.pos.y = if character.ducking {
            CHARACTER_GROUND_Y + CHARACTER_DUCK_OFFSET
        } else {
            CHARACTER_GROUND_Y
        };
    }

    // Passive shield expiry
    character.shield.decay();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::{Difficulty, DifficultyProfile};

    fn running_state() -> GameState {
        let profile = DifficultyProfile::builtin(Difficulty::Normal);
        let mut state = GameState::new(11, &profile);
        state.start(&profile);
        state.drain_events();
        state
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let mut state = running_state();
        assert!(apply_jump(&mut state));
        assert_eq!(state.drain_events(), vec![GameEvent::Sound(SoundCue::Jump)]);

        let mut peak = CHARACTER_GROUND_Y;
        let mut ticks = 0;
        while state.character.jumping && ticks < 200 {
            step(&mut state.character);
            peak = peak.min(state.character.pos.y);
            ticks += 1;
        }
        assert!(!state.character.jumping);
        assert_eq!(state.character.pos.y, CHARACTER_GROUND_Y);
        assert_eq!(state.character.vel_y, 0.0);
        assert!(peak < CHARACTER_GROUND_Y - 100.0, "peak {}", peak);
        assert!(ticks > 30 && ticks < 50, "airborne for {} ticks", ticks);
    }

    #[test]
    fn test_no_double_jump() {
        let mut state = running_state();
        assert!(apply_jump(&mut state));
        step(&mut state.character);
        let vel = state.character.vel_y;
        assert!(!apply_jump(&mut state));
        assert_eq!(state.character.vel_y, vel);
    }

    #[test]
    fn test_jump_requires_running() {
        let profile = DifficultyProfile::builtin(Difficulty::Normal);
        let mut state = GameState::new(1, &profile);
        assert!(!apply_jump(&mut state));
        state.start(&profile);
        state.phase = GamePhase::Paused;
        assert!(!apply_jump(&mut state));
    }

    #[test]
    fn test_duck_only_when_grounded() {
        let mut state = running_state();
        assert!(apply_duck(&mut state));
        assert_eq!(state.character.size.y, CHARACTER_DUCK_HEIGHT);
        step(&mut state.character);
        assert_eq!(
            state.character.pos.y,
            CHARACTER_GROUND_Y + CHARACTER_DUCK_OFFSET
        );
        release_duck(&mut state.character);
        assert_eq!(state.character.size.y, CHARACTER_HEIGHT);
        assert_eq!(state.character.pos.y, CHARACTER_GROUND_Y);

        apply_jump(&mut state);
        assert!(!apply_duck(&mut state));
        assert!(!state.character.ducking);
    }

    #[test]
    fn test_jump_while_ducking_gets_full_arc() {
        let mut state = running_state();
        apply_duck(&mut state);
        assert!(apply_jump(&mut state));
        for _ in 0..10 {
            step(&mut state.character);
        }
        assert!(state.character.jumping);
        assert!(state.character.pos.y < CHARACTER_GROUND_Y - 50.0);

        while state.character.jumping {
            step(&mut state.character);
        }
        // Still holding duck on landing
        assert_eq!(
            state.character.pos.y,
            CHARACTER_GROUND_Y + CHARACTER_DUCK_OFFSET
        );
    }

    #[test]
    fn test_shield_decays_passively() {
        let mut state = running_state();
        state.character.shield.activate(2);
        step(&mut state.character);
        assert!(state.character.has_shield());
        step(&mut state.character);
        assert!(!state.character.has_shield());
    }
}
