//! Browser LocalStorage backend (wasm32 only)

use super::{BestScoreStore, PersistenceError, encode_best, parse_best};

/// Best score under a LocalStorage key
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, PersistenceError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| PersistenceError::Unavailable("LocalStorage".into()))
    }
}

impl BestScoreStore for LocalStorageStore {
    fn load_best(&self) -> Result<u32, PersistenceError> {
        let storage = Self::storage()?;
        match storage.get_item(&self.key) {
            Ok(Some(raw)) => Ok(parse_best(&raw)),
            Ok(None) => Ok(0),
            Err(_) => Err(PersistenceError::Unavailable(format!("read {}", self.key))),
        }
    }

    fn save_best(&mut self, best: u32) -> Result<(), PersistenceError> {
        let storage = Self::storage()?;
        storage
            .set_item(&self.key, &encode_best(best)?)
            .map_err(|_| PersistenceError::Unavailable(format!("write {}", self.key)))
    }
}
