//! Best-score persistence
//!
//! A single scalar in LocalStorage. A missing or corrupt value reads as
//! zero; a failed save is logged and otherwise ignored, the session keeps
//! the in-memory value.

use serde::{Deserialize, Serialize};

/// The persisted best score across sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScore {
    pub score: u64,
}

impl BestScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "lane_rush_best";

    /// Load the stored best score (WASM only). Missing or unparseable
    /// storage yields zero.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(best) = serde_json::from_str::<BestScore>(&json) {
                    log::info!("Loaded best score: {}", best.score);
                    return best;
                }
                log::warn!("Stored best score unreadable, starting at 0");
            }
        }

        Self::default()
    }

    /// Save the best score to LocalStorage (WASM only).
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Failed to persist best score {}", self.score);
                }
            }
        } else {
            log::warn!("LocalStorage unavailable, best score not persisted");
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        assert_eq!(BestScore::default().score, 0);
    }

    #[test]
    fn test_round_trips_through_json() {
        let best = BestScore { score: 4217 };
        let json = serde_json::to_string(&best).unwrap();
        assert_eq!(serde_json::from_str::<BestScore>(&json).unwrap(), best);
    }

    #[test]
    fn test_corrupt_json_is_rejected() {
        assert!(serde_json::from_str::<BestScore>("{\"score\":\"oops\"}").is_err());
        assert!(serde_json::from_str::<BestScore>("not json").is_err());
    }
}
