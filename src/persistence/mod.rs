//! Best-score persistence
//!
//! A single non-negative integer survives between sessions. Storage is
//! allowed to be missing or broken: a failed load reads as 0 and a failed
//! save is logged and skipped, the game never stops over it.
//!
//! Backends:
//! - `MemoryStore`: in-process, for tests and as a no-storage fallback
//! - `FileStore`: one small file on native targets
//! - `LocalStorageStore`: browser LocalStorage on wasm32

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(target_arch = "wasm32")]
mod local_storage;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use thiserror::Error;

/// Why a store could not load or save
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode best score: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Somewhere the best score can live between sessions
pub trait BestScoreStore {
    /// Stored best, `Ok(0)` when nothing has been stored yet
    fn load_best(&self) -> Result<u32, PersistenceError>;

    /// Overwrite the stored best
    fn save_best(&mut self, best: u32) -> Result<(), PersistenceError>;
}

/// Load the best score, treating any failure as "no best yet"
pub fn load_best_or_default(store: &dyn BestScoreStore) -> u32 {
    match store.load_best() {
        Ok(best) => {
            log::info!("Loaded best score: {}", best);
            best
        }
        Err(e) => {
            log::warn!("Best score unavailable, starting from 0: {}", e);
            0
        }
    }
}

/// Save the best score; failures are logged and otherwise ignored
pub fn save_best_quietly(store: &mut dyn BestScoreStore, best: u32) {
    match store.save_best(best) {
        Ok(()) => log::info!("Best score saved: {}", best),
        Err(e) => log::warn!("Skipped saving best score {}: {}", best, e),
    }
}

/// Decode a persisted best score.
///
/// Accepts a JSON number, a JSON string holding a number, or bare numeric
/// text. Anything else (garbage, negatives, NaN) decodes as 0. Fractions are
/// floored and values past `u32::MAX` saturate.
pub fn parse_best(raw: &str) -> u32 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0;
    }

    let number = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Number(n)) => n.as_f64(),
        Ok(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        Ok(_) => None,
        Err(_) => raw.parse::<f64>().ok(),
    };

    match number {
        Some(n) if n.is_finite() && n > 0.0 => n.floor().min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

/// Encode a best score the way every backend stores it (plain JSON number)
pub fn encode_best(best: u32) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(&best)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// A store whose backing medium is gone
    struct BrokenStore;

    impl BestScoreStore for BrokenStore {
        fn load_best(&self) -> Result<u32, PersistenceError> {
            Err(PersistenceError::Unavailable("no medium".into()))
        }

        fn save_best(&mut self, _best: u32) -> Result<(), PersistenceError> {
            Err(PersistenceError::Unavailable("no medium".into()))
        }
    }

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_best("42"), 42);
        assert_eq!(parse_best(" 7\n"), 7);
        assert_eq!(parse_best("\"13\""), 13);
        assert_eq!(parse_best("3.9"), 3);
    }

    #[test]
    fn test_parse_malformed_is_zero() {
        assert_eq!(parse_best(""), 0);
        assert_eq!(parse_best("abc"), 0);
        assert_eq!(parse_best("-5"), 0);
        assert_eq!(parse_best("NaN"), 0);
        assert_eq!(parse_best("{\"best\": 4}"), 0);
        assert_eq!(parse_best("[1]"), 0);
        assert_eq!(parse_best("null"), 0);
    }

    #[test]
    fn test_parse_saturates() {
        assert_eq!(parse_best("1e12"), u32::MAX);
    }

    #[test]
    fn test_broken_store_loads_zero() {
        assert_eq!(load_best_or_default(&BrokenStore), 0);
    }

    #[test]
    fn test_broken_store_save_is_silent() {
        let mut store = BrokenStore;
        save_best_quietly(&mut store, 10);
    }

    #[test]
    fn test_encode_is_plain_number() {
        assert_eq!(encode_best(17).unwrap(), "17");
    }

    proptest! {
        #[test]
        fn prop_encode_then_parse(best in any::<u32>()) {
            prop_assert_eq!(parse_best(&encode_best(best).unwrap()), best);
        }

        #[test]
        fn prop_parse_never_panics(raw in ".*") {
            let _ = parse_best(&raw);
        }
    }
}
