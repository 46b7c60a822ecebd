//! Game settings and preferences
//!
//! Persisted as JSON next to the best score in the same key-value store.

use serde::{Deserialize, Serialize};

use crate::consts::TARGET_FPS;
use crate::persistence::KeyValueStore;

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pacer target rate; callbacks faster than half a frame are deferred
    pub target_fps: u32,

    // === Audio ===
    /// Play feedback sounds at all
    pub sound: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,

    // === HUD ===
    /// Show the FPS / frame time / pipe count line
    pub show_fps: bool,

    // === Accessibility ===
    /// Skip flap puffs
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_fps: TARGET_FPS,
            sound: true,
            master_volume: 0.8,
            show_fps: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "farty_frog_settings";

    /// Volume actually applied (0 when sound is off)
    pub fn effective_volume(&self) -> f32 {
        if self.sound {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Load settings, falling back to defaults on anything unreadable
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
            }
        }
        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings; failures are logged only
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        let result = serde_json::to_string(self)
            .map_err(crate::persistence::StoreError::from)
            .and_then(|json| store.set(Self::STORAGE_KEY, &json));
        match result {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Could not save settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_round_trip_through_store() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            target_fps: 30,
            show_fps: true,
            ..Default::default()
        };
        settings.save(&mut store);
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let store = MemoryStore::with_value(Settings::STORAGE_KEY, r#"{"sound": false}"#);
        let settings = Settings::load(&store);
        assert!(!settings.sound);
        assert_eq!(settings.target_fps, TARGET_FPS);
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_corrupt_json_uses_defaults() {
        let store = MemoryStore::with_value(Settings::STORAGE_KEY, "{{{");
        assert_eq!(Settings::load(&store), Settings::default());
    }
}
