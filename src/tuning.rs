//! Data-driven game balance
//!
//! [`Tuning`] bundles the four difficulty profiles and the achievement table.
//! The defaults are the built-in balance; a JSON document can override any
//! subset of it, and missing keys fall back to the defaults:
//!
//! ```json
//! { "hard": { "speed_multiplier": 1.4, "obstacle_frequency": 80, "lives_bonus": -1 } }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::sim::achievements::{Achievement, Achievements, default_achievements};
use crate::sim::difficulty::{Difficulty, DifficultyProfile};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub easy: DifficultyProfile,
    pub normal: DifficultyProfile,
    pub hard: DifficultyProfile,
    pub extreme: DifficultyProfile,
    pub achievements: Vec<Achievement>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            easy: DifficultyProfile::builtin(Difficulty::Easy),
            normal: DifficultyProfile::builtin(Difficulty::Normal),
            hard: DifficultyProfile::builtin(Difficulty::Hard),
            extreme: DifficultyProfile::builtin(Difficulty::Extreme),
            achievements: default_achievements(),
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document
    pub fn from_json(json: &str) -> GameResult<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn profile(&self, difficulty: Difficulty) -> &DifficultyProfile {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Normal => &self.normal,
            Difficulty::Hard => &self.hard,
            Difficulty::Extreme => &self.extreme,
        }
    }

    /// Fresh (all locked) achievement tracker for this table
    pub fn achievements(&self) -> Achievements {
        Achievements::new(self.achievements.clone())
    }

    pub fn validate(&self) -> GameResult<()> {
        for difficulty in Difficulty::ALL {
            let profile = self.profile(difficulty);
            if !(profile.speed_multiplier.is_finite() && profile.speed_multiplier > 0.0) {
                return Err(GameError::InvalidTuning {
                    field: format!("{}.speed_multiplier", difficulty.as_str()),
                    reason: "must be a positive number",
                });
            }
            if profile.obstacle_frequency == 0 {
                return Err(GameError::InvalidTuning {
                    field: format!("{}.obstacle_frequency", difficulty.as_str()),
                    reason: "must be at least one tick",
                });
            }
        }
        if let Some(dup) = self
            .achievements
            .iter()
            .enumerate()
            .find(|(i, a)| self.achievements[..*i].iter().any(|b| b.id == a.id))
        {
            return Err(GameError::InvalidTuning {
                field: format!("achievements.{}", dup.1.id),
                reason: "duplicate achievement id",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::achievements::Metric;

    #[test]
    fn test_defaults_validate() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.profile(Difficulty::Extreme).obstacle_frequency, 60);
        assert_eq!(tuning.achievements().iter().count(), 4);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let json = r#"{ "hard": { "speed_multiplier": 1.4, "obstacle_frequency": 80, "lives_bonus": -1 } }"#;
        let tuning = Tuning::from_json(json).unwrap();
        assert_eq!(tuning.profile(Difficulty::Hard).obstacle_frequency, 80);
        assert_eq!(tuning.profile(Difficulty::Normal).obstacle_frequency, 120);
        assert_eq!(tuning.achievements.len(), 4);
    }

    #[test]
    fn test_custom_achievements() {
        let json = r#"{ "achievements": [
            { "id": "lvl2", "name": "Onward", "description": "Reach level 2", "threshold": 2, "metric": "level" }
        ] }"#;
        let tuning = Tuning::from_json(json).unwrap();
        assert_eq!(tuning.achievements.len(), 1);
        assert_eq!(tuning.achievements[0].metric, Metric::Level);
    }

    #[test]
    fn test_extreme_lives_bonus_clamps() {
        let json = r#"{
            "easy": { "speed_multiplier": 1.0, "obstacle_frequency": 150, "lives_bonus": 2147483647 },
            "hard": { "speed_multiplier": 1.0, "obstacle_frequency": 90, "lives_bonus": -2147483648 }
        }"#;
        let tuning = Tuning::from_json(json).unwrap();
        assert_eq!(tuning.profile(Difficulty::Easy).starting_lives(), u8::MAX);
        assert_eq!(tuning.profile(Difficulty::Hard).starting_lives(), 1);
    }

    #[test]
    fn test_rejects_bad_values() {
        let json = r#"{ "easy": { "speed_multiplier": 0.0, "obstacle_frequency": 150, "lives_bonus": 2 } }"#;
        assert!(matches!(
            Tuning::from_json(json),
            Err(GameError::InvalidTuning { .. })
        ));

        let json = r#"{ "achievements": [
            { "id": "a", "name": "A", "description": "", "threshold": 1 },
            { "id": "a", "name": "B", "description": "", "threshold": 2 }
        ] }"#;
        assert!(Tuning::from_json(json).is_err());

        assert!(matches!(
            Tuning::from_json("{ nope"),
            Err(GameError::TuningParse(_))
        ));
    }
}
