//! High score leaderboard and score submission
//!
//! The simulation never persists anything itself. When a round ends it hands
//! the final score to a `ScoreRecorder`, once, and carries on whatever the
//! recorder answers.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::{GamePhase, GameState};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// Anything that can store a final score
pub trait ScoreRecorder {
    /// Record a score for a player. Returns whether it was stored.
    fn record_score(&mut self, identity: &str, score: u64, level: u32) -> bool;
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player name
    pub name: String,
    /// Player's score
    pub score: u64,
    /// Level reached
    pub level: u32,
}

/// High score leaderboard, sorted best first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, name: &str, score: u64, level: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            name: name.to_string(),
            score,
            level,
        };

        // Find insertion point (sorted descending by score)
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Display rows, padded with placeholders up to the board size
    pub fn display_rows(&self) -> Vec<String> {
        (0..MAX_HIGH_SCORES)
            .map(|i| match self.entries.get(i) {
                Some(e) => format!("{}. {} : {}", i + 1, e.name, e.score),
                None => format!("{}. --- : 0", i + 1),
            })
            .collect()
    }

    /// Load a leaderboard from a JSON file, starting fresh on any failure
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<HighScores>(&json) {
                Ok(scores) => {
                    log::info!("Loaded {} high scores", scores.entries.len());
                    return scores;
                }
                Err(e) => log::warn!("Corrupt high scores in {}: {}", path.display(), e),
            },
            Err(e) => log::debug!("No high scores at {}: {}", path.display(), e),
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save the leaderboard as JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

impl ScoreRecorder for HighScores {
    fn record_score(&mut self, identity: &str, score: u64, level: u32) -> bool {
        self.add_score(identity, score, level).is_some()
    }
}

/// Hand the final score of a finished round to a recorder.
///
/// Only fires in GameOver, with a positive score and an identity set, and at
/// most once per round. Returns the recorder's answer, or `None` when nothing
/// was submitted. A failed save is logged and not retried.
pub fn submit_final_score(
    state: &mut GameState,
    recorder: &mut dyn ScoreRecorder,
) -> Option<bool> {
    if state.phase != GamePhase::GameOver || state.score_submitted || state.score == 0 {
        return None;
    }
    let identity = state.identity.as_deref()?;

    state.score_submitted = true;
    let saved = recorder.record_score(identity, state.score, state.level);
    if saved {
        log::info!("Recorded score {} for {}", state.score, identity);
    } else {
        log::warn!("Score {} for {} was not recorded", state.score, identity);
    }
    Some(saved)
}
