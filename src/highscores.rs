//! Best score per game
//!
//! Read once when the page loads and written back whenever a session reports
//! a new best. Stored as a single JSON value.

use serde::{Deserialize, Serialize};

use crate::platform::KeyValueStore;
use crate::session::GameKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HighScores {
    pub blocks: u64,
    pub snake: u64,
    pub tiles: u64,
}

impl HighScores {
    /// Storage key
    const STORAGE_KEY: &'static str = "hackterm_arcade_highscores";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn best(&self, kind: GameKind) -> u64 {
        match kind {
            GameKind::Blocks => self.blocks,
            GameKind::Snake => self.snake,
            GameKind::Tiles => self.tiles,
        }
    }

    fn slot(&mut self, kind: GameKind) -> &mut u64 {
        match kind {
            GameKind::Blocks => &mut self.blocks,
            GameKind::Snake => &mut self.snake,
            GameKind::Tiles => &mut self.tiles,
        }
    }

    /// Does `score` beat the stored best?
    pub fn qualifies(&self, kind: GameKind, score: u64) -> bool {
        score > 0 && score > self.best(kind)
    }

    /// Record `score` if it beats the stored best. Returns true when recorded.
    pub fn submit(&mut self, kind: GameKind, score: u64) -> bool {
        if !self.qualifies(kind, score) {
            return false;
        }
        *self.slot(kind) = score;
        log::info!("New {} high score: {}", kind.as_str(), score);
        true
    }

    pub fn load(store: &impl KeyValueStore) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            match serde_json::from_str::<HighScores>(&json) {
                Ok(scores) => {
                    log::info!("Loaded high scores");
                    return scores;
                }
                Err(err) => log::warn!("Discarding unreadable high scores: {err}"),
            }
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    pub fn save(&self, store: &mut impl KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if store.set(Self::STORAGE_KEY, &json) {
                    log::info!("High scores saved");
                } else {
                    log::warn!("High scores could not be written");
                }
            }
            Err(err) => log::warn!("High scores not serializable: {err}"),
        }
    }
}
