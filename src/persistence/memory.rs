//! In-memory best-score store

use super::{BestScoreStore, PersistenceError};

/// Keeps the best score for the life of the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: Option<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a best score
    pub fn with_best(best: u32) -> Self {
        Self { best: Some(best) }
    }
}

impl BestScoreStore for MemoryStore {
    fn load_best(&self) -> Result<u32, PersistenceError> {
        Ok(self.best.unwrap_or(0))
    }

    fn save_best(&mut self, best: u32) -> Result<(), PersistenceError> {
        self.best = Some(best);
        Ok(())
    }
}
