//! One-shot achievements
//!
//! The achievement list outlives individual sessions: unlocks are kept when a
//! new run starts.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState, SoundCue};

/// Which session value an achievement is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Score,
    Level,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub threshold: u64,
    #[serde(default)]
    pub metric: Metric,
    #[serde(default, skip_serializing)]
    pub unlocked: bool,
}

impl Achievement {
    pub fn new(id: &str, name: &str, description: &str, threshold: u64, metric: Metric) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            threshold,
            metric,
            unlocked: false,
        }
    }

    fn reached(&self, score: u64, level: u32) -> bool {
        let value = match self.metric {
            Metric::Score => score,
            Metric::Level => u64::from(level),
        };
        value >= self.threshold
    }
}

/// Built-in achievement table
pub fn default_achievements() -> Vec<Achievement> {
    vec![
        Achievement::new("first100", "Getting Started", "Score 100 points", 100, Metric::Score),
        Achievement::new("first500", "Warming Up", "Score 500 points", 500, Metric::Score),
        Achievement::new("first1000", "Dino Master", "Score 1000 points", 1000, Metric::Score),
        Achievement::new("level5", "Survivor", "Reach level 5", 5, Metric::Level),
    ]
}

/// Process-wide achievement tracker
#[derive(Debug, Clone)]
pub struct Achievements {
    entries: Vec<Achievement>,
}

impl Default for Achievements {
    fn default() -> Self {
        Self::new(default_achievements())
    }
}

impl Achievements {
    pub fn new(entries: Vec<Achievement>) -> Self {
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Achievement> {
        self.entries.iter()
    }

    pub fn unlocked_count(&self) -> usize {
        self.entries.iter().filter(|a| a.unlocked).count()
    }

    /// Unlock everything newly reached; returns the indices unlocked now
    pub fn check(&mut self, score: u64, level: u32) -> Vec<usize> {
        let mut unlocked = Vec::new();
        for (idx, achievement) in self.entries.iter_mut().enumerate() {
            if !achievement.unlocked && achievement.reached(score, level) {
                achievement.unlocked = true;
                unlocked.push(idx);
            }
        }
        unlocked
    }

    /// Run the check for a session and emit banner + sound cues
    pub fn track(&mut self, state: &mut GameState) {
        for idx in self.check(state.score, state.level) {
            let achievement = &self.entries[idx];
            log::info!("Achievement unlocked: {}", achievement.name);
            state.emit(GameEvent::AchievementUnlocked {
                id: achievement.id.clone(),
                name: achievement.name.clone(),
                description: achievement.description.clone(),
            });
            state.emit(GameEvent::Sound(SoundCue::Achievement));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::{Difficulty, DifficultyProfile};

    #[test]
    fn test_unlock_fires_once() {
        let profile = DifficultyProfile::builtin(Difficulty::Normal);
        let mut state = GameState::new(1, &profile);
        let mut achievements = Achievements::new(default_achievements());

        state.score = 120;
        achievements.track(&mut state);
        achievements.track(&mut state);
        let banners: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::AchievementUnlocked { .. }))
            .collect();
        assert_eq!(banners.len(), 1);
        assert!(matches!(
            &banners[0],
            GameEvent::AchievementUnlocked { id, .. } if id == "first100"
        ));
        assert_eq!(achievements.unlocked_count(), 1);
    }

    #[test]
    fn test_level_metric() {
        let mut achievements = Achievements::new(default_achievements());
        // Level 5 without the 1000-point score achievement
        assert_eq!(achievements.check(0, 5), vec![3]);
        assert!(achievements.check(0, 6).is_empty());
    }

    #[test]
    fn test_several_unlock_in_one_tick() {
        let mut achievements = Achievements::new(default_achievements());
        assert_eq!(achievements.check(1200, 5), vec![0, 1, 2, 3]);
        assert_eq!(achievements.unlocked_count(), 4);
    }

    #[test]
    fn test_metric_defaults_to_score() {
        let json = r#"{"id":"x","name":"X","description":"d","threshold":50}"#;
        let a: Achievement = serde_json::from_str(json).unwrap();
        assert_eq!(a.metric, Metric::Score);
        assert!(!a.unlocked);
    }
}
