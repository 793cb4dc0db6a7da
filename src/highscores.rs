//! Persistent scoreboard
//!
//! Top 10 runs by score, saved to LocalStorage between sessions.

use serde::{Deserialize, Serialize};

/// The board holds this many runs
pub const MAX_HIGH_SCORES: usize = 10;

/// One row of the scoreboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Name the player typed in
    pub name: String,
    /// Final score of the run
    pub score: u64,
}

/// Scoreboard, best run first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Where the board lives in LocalStorage
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "pixel_invaders_highscores";

    /// Empty board
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Whether a run with this score would make the board
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        self.entries.len() < MAX_HIGH_SCORES
            || self.entries.last().is_some_and(|lowest| score > lowest.score)
    }

    /// Insert a run, keeping the board sorted and capped.
    /// Returns the 1-indexed rank, or None if the score fell off the bottom.
    pub fn add_score(&mut self, name: &str, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        // First slot with a strictly lower score; ties rank behind earlier runs
        let rank = self.entries.partition_point(|e| e.score >= score);
        self.entries.insert(
            rank,
            HighScoreEntry {
                name: name.to_string(),
                score,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank + 1)
    }

    /// Best score on the board, if any
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load the saved board (wasm only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let Some(storage) = local_storage() else {
            return Self::new();
        };
        let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) else {
            log::info!("No saved scoreboard, starting fresh");
            return Self::new();
        };
        match serde_json::from_str::<HighScores>(&json) {
            Ok(board) => {
                log::info!("Scoreboard loaded ({} entries)", board.entries.len());
                board
            }
            Err(e) => {
                log::warn!("Saved scoreboard unreadable, starting fresh: {}", e);
                Self::new()
            }
        }
    }

    /// Persist the board (wasm only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = local_storage() else {
            log::warn!("LocalStorage unavailable, scoreboard not saved");
            return;
        };
        let Ok(json) = serde_json::to_string(self) else {
            return;
        };
        if storage.set_item(Self::STORAGE_KEY, &json).is_ok() {
            log::info!("Scoreboard saved ({} entries)", self.entries.len());
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
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
