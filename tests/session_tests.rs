//! Headless session tests driven through the public API only.
//!
//! Each test wires a [`GameState`] to in-memory collaborators the same way the
//! browser driver does: one `tick` per frame, input cleared afterwards, events
//! drained and inspected.

use dino_dash::highscores::{BEST_SCORE_KEY, best_score};
use dino_dash::sim::{
    Achievements, Difficulty, DifficultyProfile, GameEvent, GamePhase, GameState, SoundCue,
    TickContext, TickInput, tick,
};
use dino_dash::{MemoryStore, ScoreStore, Settings, Tuning};

// ── Helpers ───────────────────────────────────────────────────────────────────

struct Session {
    state: GameState,
    profile: DifficultyProfile,
    achievements: Achievements,
    scores: MemoryStore,
    input: TickInput,
    events: Vec<GameEvent>,
}

impl Session {
    fn new(seed: u64, tuning: &Tuning, difficulty: Difficulty) -> Self {
        let profile = *tuning.profile(difficulty);
        Self {
            state: GameState::new(seed, &profile),
            profile,
            achievements: tuning.achievements(),
            scores: MemoryStore::default(),
            input: TickInput::default(),
            events: Vec::new(),
        }
    }

    /// One frame: tick, clear one-shot input, collect events
    fn frame(&mut self) {
        let mut ctx = TickContext {
            profile: &self.profile,
            achievements: &mut self.achievements,
            scores: &mut self.scores,
        };
        tick(&mut self.state, &self.input, &mut ctx);
        self.input.clear();
        self.events.extend(self.state.drain_events());
    }

    fn press(&mut self) {
        self.input.primary = true;
        self.frame();
    }

    /// Idle until the run ends (or give up)
    fn run_until_over(&mut self, max_frames: u32) -> bool {
        for _ in 0..max_frames {
            self.frame();
            if self.state.phase == GamePhase::GameOver {
                return true;
            }
        }
        false
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// An idle player loses every life and the run ends with a GameOver event.
#[test]
fn idle_run_ends_in_game_over() {
    let mut s = Session::new(7, &Tuning::default(), Difficulty::Normal);
    s.press();
    assert_eq!(s.state.phase, GamePhase::Running);

    assert!(s.run_until_over(20_000), "idle run should end");
    assert_eq!(s.state.lives, 0);

    let lost: Vec<u8> = s
        .events
        .iter()
        .filter_map(|e| match e {
            GameEvent::LifeLost { lives_left } => Some(*lives_left),
            _ => None,
        })
        .collect();
    assert_eq!(lost, vec![2, 1]);
    assert!(
        s.events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. }))
    );
    assert!(s.events.contains(&GameEvent::Sound(SoundCue::Hit)));
}

/// The frozen game-over screen restarts into a clean run; the best score and
/// unlocked achievements carry over.
#[test]
fn restart_after_game_over_keeps_best_score() {
    let mut s = Session::new(11, &Tuning::default(), Difficulty::Hard);
    s.press();
    // Jump now and then so some obstacles pass and score points
    for i in 0..30_000u32 {
        if i % 53 == 0 {
            s.input.primary = true;
        }
        s.frame();
        if s.state.phase == GamePhase::GameOver {
            break;
        }
    }
    assert_eq!(s.state.phase, GamePhase::GameOver);
    let final_score = s.state.score;
    assert_eq!(best_score(&s.scores), final_score);

    let frozen = s.state.time_ticks;
    s.frame();
    assert_eq!(s.state.time_ticks, frozen);

    let unlocked = s.achievements.unlocked_count();
    s.press();
    assert_eq!(s.state.phase, GamePhase::Running);
    assert_eq!(s.state.score, 0);
    assert_eq!(s.state.lives, s.profile.starting_lives());
    assert!(s.state.obstacles.is_empty());
    assert_eq!(s.achievements.unlocked_count(), unlocked);
    assert_eq!(best_score(&s.scores), final_score);
}

/// A lower score never overwrites the stored best.
#[test]
fn stored_best_is_not_lowered() {
    let mut s = Session::new(5, &Tuning::default(), Difficulty::Extreme);
    s.scores.set(BEST_SCORE_KEY, 1_000_000);
    s.press();
    assert!(s.run_until_over(20_000));
    assert!(s.events.contains(&GameEvent::GameOver {
        score: s.state.score,
        new_best: false,
    }));
    assert_eq!(best_score(&s.scores), 1_000_000);
}

/// Tuning documents shape the session: lives clamp to at least one.
#[test]
fn tuning_override_flows_into_session() {
    let json = r#"{
        "extreme": { "speed_multiplier": 2.0, "obstacle_frequency": 60, "lives_bonus": -9 },
        "achievements": [
            { "id": "lvl2", "name": "Onward", "description": "Reach level 2", "threshold": 2, "metric": "level" }
        ]
    }"#;
    let tuning = Tuning::from_json(json).unwrap();
    let mut s = Session::new(3, &tuning, Difficulty::Extreme);
    assert_eq!(s.state.lives, 1);

    s.press();
    s.state.score = 300;
    s.frame();
    assert_eq!(s.state.level, 2);
    assert_eq!(s.achievements.unlocked_count(), 1);
    assert!(s.events.iter().any(|e| matches!(
        e,
        GameEvent::AchievementUnlocked { id, .. } if id == "lvl2"
    )));
}

/// Switching difficulty mid-run resets lives for the new profile.
#[test]
fn difficulty_change_resets_lives() {
    let tuning = Tuning::default();
    let mut settings = Settings::default();
    let mut s = Session::new(9, &tuning, settings.difficulty);
    s.press();
    s.state.lives = 1;

    let difficulty = settings.select_difficulty("Easy").unwrap();
    s.profile = *tuning.profile(difficulty);
    s.state.reset_lives(&s.profile);
    assert_eq!(s.state.lives, 5);

    assert!(settings.select_difficulty("nightmare").is_err());
    assert_eq!(settings.difficulty, Difficulty::Easy);
}

/// Same seed and inputs, same run.
#[test]
fn sessions_replay_identically() {
    let tuning = Tuning::default();
    let mut a = Session::new(42, &tuning, Difficulty::Normal);
    let mut b = Session::new(42, &tuning, Difficulty::Normal);
    for i in 0..3_000u32 {
        let jump = i % 41 == 0;
        a.input.primary = jump;
        b.input.primary = jump;
        a.frame();
        b.frame();
    }
    assert_eq!(a.state.score, b.state.score);
    assert_eq!(a.state.lives, b.state.lives);
    assert_eq!(a.state.phase, b.state.phase);
    assert_eq!(a.events, b.events);
}

/// A best score cached from GameOver events stays in step with the store
/// across several runs, without reading the store again.
#[test]
fn game_over_events_track_stored_best() {
    let mut s = Session::new(21, &Tuning::default(), Difficulty::Hard);
    let mut cached = best_score(&s.scores);

    for run in 0..3u64 {
        s.press();
        // Later runs start with a head start so at least one beats the best
        s.state.score = run * 40;
        assert!(s.run_until_over(20_000));
        for event in s.events.drain(..) {
            if let GameEvent::GameOver {
                score,
                new_best: true,
            } = event
            {
                cached = score;
            }
        }
        assert_eq!(cached, best_score(&s.scores));
    }
    assert!(cached >= 80);
}
