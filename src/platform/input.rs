//! Input mapping
//!
//! Browser key codes and on-screen buttons are translated into
//! [`InputEvent`]s, which fold into the buffered [`TickInput`] for the next
//! tick.

use crate::sim::state::PowerUpKind;
use crate::sim::tick::TickInput;

/// A single player command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Start, jump or restart
    Primary,
    DuckPress,
    DuckRelease,
    Activate(PowerUpKind),
    TogglePause,
}

impl InputEvent {
    /// Map a `KeyboardEvent.code` on key down
    pub fn key_down(code: &str) -> Option<Self> {
        match code {
            "Space" | "ArrowUp" => Some(Self::Primary),
            "ArrowDown" => Some(Self::DuckPress),
            "Digit1" => Some(Self::Activate(PowerUpKind::SpeedBoost)),
            "Digit2" => Some(Self::Activate(PowerUpKind::Shield)),
            "Digit3" => Some(Self::Activate(PowerUpKind::SlowMo)),
            "KeyP" => Some(Self::TogglePause),
            _ => None,
        }
    }

    /// Map a `KeyboardEvent.code` on key up
    pub fn key_up(code: &str) -> Option<Self> {
        match code {
            "ArrowDown" => Some(Self::DuckRelease),
            _ => None,
        }
    }

    /// Buffer this command for the next tick
    pub fn apply(self, input: &mut TickInput) {
        match self {
            Self::Primary => input.primary = true,
            Self::DuckPress => input.duck_press = true,
            Self::DuckRelease => input.duck_release = true,
            Self::Activate(kind) => input.activate.push(kind),
            // Two toggles within one frame cancel out
            Self::TogglePause => input.pause = !input.pause,
        }
    }
}
