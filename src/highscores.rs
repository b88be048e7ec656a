//! Best survival time
//!
//! A single scalar, loaded at startup and written back only when beaten.

use crate::persistence::HighScoreStore;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HighScore {
    best: f64,
}

impl HighScore {
    pub fn new(best: f64) -> Self {
        Self { best }
    }

    /// Load from a store (0.0 when nothing usable is stored)
    pub fn load(store: &mut dyn HighScoreStore) -> Self {
        Self::new(store.load_high_score())
    }

    pub fn best(&self) -> f64 {
        self.best
    }

    /// Check if a score would beat the record
    pub fn qualifies(&self, score: f64) -> bool {
        score > self.best
    }

    /// Record `score` if it beats the best. Returns true when it did.
    pub fn submit(&mut self, score: f64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }

    /// Submit and persist on improvement
    pub fn submit_and_save(&mut self, score: f64, store: &mut dyn HighScoreStore) -> bool {
        let improved = self.submit(score);
        if improved {
            store.save_high_score(self.best);
        }
        improved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryHighScoreStore;

    #[test]
    fn test_beating_updates_and_saves() {
        let mut store = MemoryHighScoreStore::with_score(40.0);
        let mut best = HighScore::load(&mut store);
        assert!(best.submit_and_save(45.2, &mut store));
        assert_eq!(best.best(), 45.2);
        assert_eq!(store.stored, Some(45.2));
    }

    #[test]
    fn test_lower_score_leaves_store_alone() {
        let mut store = MemoryHighScoreStore::with_score(40.0);
        let mut best = HighScore::load(&mut store);
        assert!(!best.submit_and_save(30.0, &mut store));
        assert_eq!(best.best(), 40.0);
        assert!(store.saves.is_empty());
    }

    #[test]
    fn test_tie_does_not_qualify() {
        let best = HighScore::new(12.5);
        assert!(!best.qualifies(12.5));
        assert!(best.qualifies(12.51));
    }
}
