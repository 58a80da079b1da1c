//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key codes to tick commands)
//! - Storage (LocalStorage on web)

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod storage;
