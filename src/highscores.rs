//! Best score persistence
//!
//! Stored as base-10 text under a single key. Reads treat anything missing or
//! unparseable as 0; write failures are logged and dropped.

use crate::persistence::KeyValueStore;

/// Storage key for the best score
pub const STORAGE_KEY: &str = "farty_frog_high_score";

/// Read the best score (0 when missing or garbage)
pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> u32 {
    match store.get(STORAGE_KEY) {
        Some(text) => match text.trim().parse::<u32>() {
            Ok(best) => {
                log::info!("Loaded high score: {}", best);
                best
            }
            Err(_) => {
                log::warn!("Unreadable high score {:?}, starting from 0", text);
                0
            }
        },
        None => {
            log::info!("No high score found, starting fresh");
            0
        }
    }
}

/// Write the best score through. Returns whether the write landed.
pub fn save<S: KeyValueStore + ?Sized>(store: &mut S, best: u32) -> bool {
    match store.set(STORAGE_KEY, &best.to_string()) {
        Ok(()) => {
            log::info!("Saved high score: {}", best);
            true
        }
        Err(e) => {
            log::warn!("Could not save high score {}: {}", best, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, StoreError};

    struct ReadOnly;

    impl KeyValueStore for ReadOnly {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    #[test]
    fn test_missing_is_zero() {
        assert_eq!(load(&MemoryStore::new()), 0);
    }

    #[test]
    fn test_unparseable_is_zero() {
        assert_eq!(load(&MemoryStore::with_value(STORAGE_KEY, "lots")), 0);
        assert_eq!(load(&MemoryStore::with_value(STORAGE_KEY, "-3")), 0);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        assert!(save(&mut store, 23));
        assert_eq!(store.get(STORAGE_KEY).as_deref(), Some("23"));
        assert_eq!(load(&store), 23);
    }

    #[test]
    fn test_failed_write_is_swallowed() {
        assert!(!save(&mut ReadOnly, 5));
    }
}
