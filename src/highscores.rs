//! Best score persistence
//!
//! The game keeps exactly one persisted value: the best score. Storage is a
//! tiny key/value interface so the browser build can back it with
//! LocalStorage while tests and the native build keep it in memory.

use std::collections::HashMap;

/// Storage key for the best score
pub const BEST_SCORE_KEY: &str = "dino_dash_best_score";

/// Named integer storage
pub trait ScoreStore {
    /// Read a value; `None` when missing or unreadable
    fn get(&self, key: &str) -> Option<u64>;
    /// Write a value. Failures are the store's problem, never the caller's.
    fn set(&mut self, key: &str, value: u64);
}

/// In-memory store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, u64>,
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Option<u64> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: u64) {
        self.values.insert(key.to_string(), value);
    }
}

/// Stored best score; a missing value counts as zero
pub fn best_score(store: &dyn ScoreStore) -> u64 {
    store.get(BEST_SCORE_KEY).unwrap_or(0)
}

/// Store `score` if it beats the current best.
/// Returns true only when the stored value changed.
pub fn record_best(store: &mut dyn ScoreStore, score: u64) -> bool {
    if score <= best_score(store) {
        return false;
    }
    store.set(BEST_SCORE_KEY, score);
    log::info!("New best score: {}", score);
    true
}
