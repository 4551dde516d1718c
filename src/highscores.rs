//! Local leaderboard
//!
//! Keeps the best runs sorted by score, highest first. Storage lives in
//! [`crate::persistence`]; this type is pure data.

use serde::{Deserialize, Serialize};

use crate::sim::{Character, Difficulty};

/// Maximum number of entries to keep
pub const MAX_HIGH_SCORES: usize = 20;

/// One finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub score: u64,
    #[serde(default)]
    pub character: Character,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub coins: u64,
    /// Longest streak of the run
    #[serde(default)]
    pub best_combo: u32,
    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub timestamp: f64,
}

/// Leaderboard, sorted descending by score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    entries: Vec<ScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored entries, restoring order and the size cap
    pub fn from_entries(mut entries: Vec<ScoreEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Would this score make the board?
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Insert a run. Returns its 1-indexed place, or `None` if it fell off the board.
    ///
    /// Ties go below existing entries with the same score.
    pub fn add_score(&mut self, entry: ScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        let pos = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(pos + 1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: u64) -> ScoreEntry {
        ScoreEntry {
            score,
            character: Character::Classic,
            difficulty: Difficulty::Easy,
            coins: 0,
            best_combo: 0,
            timestamp: 0.0,
        }
    }

    #[test]
    fn test_keeps_top_twenty() {
        let mut board = HighScores::new();
        // Interleaved so inserts land all over the board
        for i in 0..25u64 {
            board.add_score(entry((i * 7) % 25));
        }
        assert_eq!(board.len(), MAX_HIGH_SCORES);
        let scores: Vec<u64> = board.entries().iter().map(|e| e.score).collect();
        let expected: Vec<u64> = (5..25).rev().collect();
        assert_eq!(scores, expected);
        assert_eq!(board.top_score(), Some(24));
    }

    #[test]
    fn test_add_score_reports_place() {
        let mut board = HighScores::new();
        assert_eq!(board.add_score(entry(10)), Some(1));
        assert_eq!(board.add_score(entry(30)), Some(1));
        assert_eq!(board.add_score(entry(20)), Some(2));
        // Tie lands after the existing entry
        assert_eq!(board.add_score(entry(20)), Some(3));
    }

    #[test]
    fn test_full_board_rejects_low_scores() {
        let mut board = HighScores::new();
        for score in 1..=20 {
            board.add_score(entry(score));
        }
        assert!(!board.qualifies(1));
        assert_eq!(board.add_score(entry(1)), None);
        assert!(board.qualifies(2));
        assert_eq!(board.add_score(entry(2)), Some(20));
        assert_eq!(board.entries().last().map(|e| e.score), Some(2));
    }

    #[test]
    fn test_zero_score_recorded_on_empty_board() {
        let mut board = HighScores::new();
        assert_eq!(board.add_score(entry(0)), Some(1));
    }

    #[test]
    fn test_from_entries_sorts_and_caps() {
        let board = HighScores::from_entries((0..30).map(entry).collect());
        assert_eq!(board.len(), MAX_HIGH_SCORES);
        assert_eq!(board.top_score(), Some(29));
        assert_eq!(board.entries().last().map(|e| e.score), Some(10));
    }

    #[test]
    fn test_json_is_a_plain_array() {
        let mut board = HighScores::new();
        board.add_score(entry(5));
        let json = serde_json::to_string(&board).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"bestCombo\":0"));
        let back: HighScores = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }
}
