//! Persistence of records and preferences
//!
//! Features:
//! - Pluggable key-value backend (memory, browser LocalStorage)
//! - JSON payloads via serde
//! - Missing or corrupt data falls back to defaults, never an error

pub mod store;

pub use store::{KeyValueStore, MemoryStore};

#[cfg(target_arch = "wasm32")]
pub use store::LocalStore;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::highscores::{HighScores, ScoreEntry};
use crate::sim::SessionStats;

/// Storage keys
pub mod keys {
    pub const HIGH_SCORE: &str = "flappy_ultimate_high_score";
    pub const TOP_SCORES: &str = "flappy_ultimate_top_scores";
    pub const STATS: &str = "flappy_ultimate_stats";
    pub const SETTINGS: &str = "flappy_ultimate_settings";
}

/// Records the game driver reads at startup and writes after each run
pub trait ScoreStore {
    fn load_high_score(&self) -> u64;
    fn save_high_score(&mut self, score: u64);
    fn load_top_scores(&self) -> HighScores;
    /// Record a run; returns its leaderboard place if it made the board
    fn append_score(&mut self, entry: ScoreEntry) -> Option<usize>;
    fn load_stats(&self) -> SessionStats;
    fn save_stats(&mut self, stats: &SessionStats);
}

/// Read a JSON value, `None` if absent or unparsable
pub fn load_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("Ignoring malformed {key}: {err}");
            None
        }
    }
}

pub fn save_json<T: Serialize>(store: &mut impl KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => store.set(key, &json),
        Err(err) => log::warn!("Failed to serialize {key}: {err}"),
    }
}

/// [`ScoreStore`] on top of any key-value backend
#[derive(Debug, Clone, Default)]
pub struct Persistence<S> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> ScoreStore for Persistence<S> {
    fn load_high_score(&self) -> u64 {
        let Some(raw) = self.store.get(keys::HIGH_SCORE) else {
            return 0;
        };
        raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring malformed high score {raw:?}");
            0
        })
    }

    fn save_high_score(&mut self, score: u64) {
        self.store.set(keys::HIGH_SCORE, &score.to_string());
    }

    fn load_top_scores(&self) -> HighScores {
        load_json::<Vec<ScoreEntry>>(&self.store, keys::TOP_SCORES)
            .map(HighScores::from_entries)
            .unwrap_or_default()
    }

    fn append_score(&mut self, entry: ScoreEntry) -> Option<usize> {
        let mut scores = self.load_top_scores();
        let place = scores.add_score(entry);
        if place.is_some() {
            save_json(&mut self.store, keys::TOP_SCORES, &scores);
        }
        place
    }

    fn load_stats(&self) -> SessionStats {
        load_json(&self.store, keys::STATS).unwrap_or_default()
    }

    fn save_stats(&mut self, stats: &SessionStats) {
        save_json(&mut self.store, keys::STATS, stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Character, Difficulty};

    fn entry(score: u64) -> ScoreEntry {
        ScoreEntry {
            score,
            character: Character::Robin,
            difficulty: Difficulty::Hard,
            coins: 20,
            best_combo: 3,
            timestamp: 1_700_000_000_000.0,
        }
    }

    #[test]
    fn test_missing_records_default() {
        let persistence = Persistence::new(MemoryStore::new());
        assert_eq!(persistence.load_high_score(), 0);
        assert!(persistence.load_top_scores().is_empty());
        assert_eq!(persistence.load_stats(), SessionStats::default());
    }

    #[test]
    fn test_malformed_records_default() {
        let mut store = MemoryStore::new();
        store.set(keys::HIGH_SCORE, "lots");
        store.set(keys::TOP_SCORES, "{not json");
        store.set(keys::STATS, r#"{"gamesPlayed":"many"}"#);
        let persistence = Persistence::new(store);
        assert_eq!(persistence.load_high_score(), 0);
        assert!(persistence.load_top_scores().is_empty());
        assert_eq!(persistence.load_stats(), SessionStats::default());
    }

    #[test]
    fn test_high_score_stored_as_integer_text() {
        let mut persistence = Persistence::new(MemoryStore::new());
        persistence.save_high_score(42);
        assert_eq!(persistence.store().get(keys::HIGH_SCORE).as_deref(), Some("42"));
        assert_eq!(persistence.load_high_score(), 42);
    }

    #[test]
    fn test_append_score_persists_board() {
        let mut persistence = Persistence::new(MemoryStore::new());
        assert_eq!(persistence.append_score(entry(5)), Some(1));
        assert_eq!(persistence.append_score(entry(9)), Some(1));
        let board = persistence.load_top_scores();
        assert_eq!(board.len(), 2);
        assert_eq!(board.entries()[0].score, 9);
        assert_eq!(board.entries()[1].character, Character::Robin);
    }

    #[test]
    fn test_stats_tolerate_missing_fields() {
        let mut store = MemoryStore::new();
        store.set(keys::STATS, r#"{"gamesPlayed":3,"totalScore":40}"#);
        let persistence = Persistence::new(store);
        let stats = persistence.load_stats();
        assert_eq!(stats.games_played, 3);
        assert_eq!(stats.total_score, 40);
        assert_eq!(stats.pipes_avoided, 0);
    }
}
