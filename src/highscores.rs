//! High score leaderboard
//!
//! The player's ten best scores, persisted as a plain JSON array. A fixed
//! benchmark entry is merged in for display but never stored.

use serde::{Deserialize, Serialize};

use crate::consts::{BENCHMARK_NAME, BENCHMARK_SCORE, LEADERBOARD_ROWS};
use crate::persistence::{self, KeyValueStore};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// One row of the merged leaderboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub name: &'static str,
    pub score: u64,
    /// True for the fixed reference entry
    pub benchmark: bool,
}

/// Player's historical scores, descending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    scores: Vec<u64>,
}

impl HighScores {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "game_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self { scores: Vec::new() }
    }

    /// Build from arbitrary scores, restoring order and length
    pub fn from_scores(mut scores: Vec<u64>) -> Self {
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(MAX_HIGH_SCORES);
        Self { scores }
    }

    pub fn scores(&self) -> &[u64] {
        &self.scores
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Record a finished game. Every score is appended, then the list is
    /// re-sorted and trimmed; returns the 1-indexed rank it landed at
    /// (which may be past the end if it was trimmed away).
    pub fn add_score(&mut self, score: u64) -> usize {
        let rank = self.scores.iter().take_while(|&&s| s >= score).count() + 1;
        self.scores.push(score);
        self.scores.sort_unstable_by(|a, b| b.cmp(a));
        self.scores.truncate(MAX_HIGH_SCORES);
        rank
    }

    /// Benchmark plus the player's scores, best first, top rows only.
    /// The benchmark wins ties.
    pub fn standings(&self) -> Vec<Standing> {
        let mut rows: Vec<Standing> = std::iter::once(Standing {
            name: BENCHMARK_NAME,
            score: BENCHMARK_SCORE,
            benchmark: true,
        })
        .chain(self.scores.iter().map(|&score| Standing {
            name: "You",
            score,
            benchmark: false,
        }))
        .collect();
        rows.sort_by(|a, b| b.score.cmp(&a.score));
        rows.truncate(LEADERBOARD_ROWS);
        rows
    }

    /// Load from storage; missing, unreadable or corrupt data yields an empty board
    pub fn load(store: &impl KeyValueStore) -> Self {
        match persistence::load_json::<Vec<u64>>(store, Self::STORAGE_KEY) {
            Ok(Some(scores)) => {
                let scores = Self::from_scores(scores);
                log::info!("Loaded {} high scores", scores.scores.len());
                scores
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Could not load high scores: {e}");
                Self::new()
            }
        }
    }

    /// Persist to storage. Failures are logged, never returned.
    pub fn save(&self, store: &mut impl KeyValueStore) {
        match persistence::save_json(store, Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("High scores saved ({} entries)", self.scores.len()),
            Err(e) => log::warn!("Could not save high scores: {e}"),
        }
    }
}
