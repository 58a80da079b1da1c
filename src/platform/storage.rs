//! LocalStorage-backed score store

use web_sys::Storage;

use crate::highscores::ScoreStore;

/// Best-score storage in the browser's LocalStorage.
/// Missing or unavailable storage degrades to "no value" and ignored writes.
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - best score will not persist");
        }
        Self { storage }
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<u64> {
        let raw = self.storage.as_ref()?.get_item(key).ok().flatten()?;
        raw.trim().parse().ok()
    }

    fn set(&mut self, key: &str, value: u64) {
        let Some(storage) = &self.storage else { return };
        if storage.set_item(key, &value.to_string()).is_err() {
            log::warn!("Failed to save {}", key);
        }
    }
}
