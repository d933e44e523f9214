//! High score tracker
//!
//! Keeps the best score seen so far and writes it through a
//! [`HighScoreStore`] whenever it improves. Loading and saving are best
//! effort: a missing or unreadable record counts as 0 and a failed write
//! only logs a warning.

use std::path::Path;

use crate::persistence::{HighScoreStore, JsonFileStore, MemoryStore};

pub struct HighScores {
    best: u64,
    store: Box<dyn HighScoreStore>,
}

impl std::fmt::Debug for HighScores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighScores").field("best", &self.best).finish_non_exhaustive()
    }
}

impl HighScores {
    /// Read the stored best score, treating any failure as "no record"
    pub fn load(store: Box<dyn HighScoreStore>) -> Self {
        let best = match store.load() {
            Ok(Some(score)) => {
                log::info!("Loaded high score {score}");
                score
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(err) => {
                log::warn!("Ignoring unreadable high score: {err:#}");
                0
            }
        };
        Self { best, store }
    }

    /// Tracker backed by a JSON file
    pub fn from_file(path: &Path) -> Self {
        Self::load(Box::new(JsonFileStore::new(path)))
    }

    /// Tracker that forgets everything when dropped
    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryStore::default()))
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Check if a score would beat the current record
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a score. Returns true if it was a new best.
    pub fn submit(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        log::info!("New high score {score}");
        if let Err(err) = self.store.save(score) {
            log::warn!("Failed to save high score: {err:#}");
        }
        true
    }
}
