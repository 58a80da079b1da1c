//! Game settings and preferences
//!
//! Held in memory for the lifetime of the page; only the best score is
//! persisted.

use crate::error::GameResult;
use crate::sim::difficulty::Difficulty;

/// Game settings/preferences
#[derive(Debug, Clone)]
pub struct Settings {
    /// Selected difficulty profile
    pub difficulty: Difficulty,
    /// Play sound cues
    pub sound_enabled: bool,
    /// Shake the canvas on hits
    pub screen_shake: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            sound_enabled: true,
            screen_shake: true,
        }
    }
}

impl Settings {
    /// Switch difficulty by name. Unknown names are rejected and the current
    /// selection is kept.
    pub fn select_difficulty(&mut self, name: &str) -> GameResult<Difficulty> {
        let difficulty = name.parse::<Difficulty>()?;
        if difficulty != self.difficulty {
            log::info!("Difficulty: {} -> {}", self.difficulty.as_str(), difficulty.as_str());
        }
        self.difficulty = difficulty;
        Ok(difficulty)
    }

    /// Flip sound on/off; returns the new state
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_difficulty_keeps_previous() {
        let mut settings = Settings::default();
        settings.select_difficulty("hard").unwrap();
        assert!(settings.select_difficulty("impossible").is_err());
        assert_eq!(settings.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_toggle_sound() {
        let mut settings = Settings::default();
        assert!(!settings.toggle_sound());
        assert!(settings.toggle_sound());
    }
}
