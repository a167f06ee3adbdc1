use chrono::Utc;
use std::collections::HashMap;

use super::{PlayerRecord, ProgressStore};
use crate::error::PersistError;
use crate::game::ProgressionState;

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, PlayerRecord>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn saves(&self) -> usize {
        self.saves
    }

    pub fn get(&self, email: &str) -> Option<&ProgressionState> {
        self.records.get(email).map(|r| &r.state)
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self, email: &str) -> Result<Option<ProgressionState>, PersistError> {
        Ok(self.get(email).cloned())
    }

    fn save(&mut self, state: &ProgressionState) -> Result<(), PersistError> {
        let email = state.player().email().to_string();
        let previous = self.records.remove(&email);
        let record = PlayerRecord::touch(previous, state, Utc::now());
        self.records.insert(email, record);
        self.saves += 1;
        Ok(())
    }

    fn records(&self) -> Result<Vec<PlayerRecord>, PersistError> {
        Ok(self.records.values().cloned().collect())
    }
}
