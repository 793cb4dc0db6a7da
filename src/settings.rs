//! Persistent player settings
//!
//! Audio preferences, persisted to LocalStorage alongside the leaderboard.

use serde::{Deserialize, Serialize};

/// Player-adjustable settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Background music muted
    pub music_muted: bool,
    /// Sound effects muted
    pub sfx_muted: bool,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Effect volume (0.0 - 1.0)
    pub sfx_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_muted: false,
            sfx_muted: false,
            music_volume: 0.7,
            sfx_volume: 1.0,
        }
    }
}

impl Settings {
    /// Where preferences live in LocalStorage
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "pixel_invaders_settings";

    /// Load saved preferences, falling back to defaults (wasm only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let Some(storage) = local_storage() else {
            return Self::default();
        };
        let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) else {
            log::info!("No saved settings, using defaults");
            return Self::default();
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("Saved settings unreadable, using defaults: {}", e);
            Self::default()
        })
    }

    /// Persist preferences (wasm only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = local_storage() else {
            return;
        };
        if let Ok(json) = serde_json::to_string(self) {
            let _ = storage.set_item(Self::STORAGE_KEY, &json);
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}
