//! Native best-score file
//!
//! The file holds nothing but the score as JSON text, the same payload the
//! browser build keeps in LocalStorage.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{BestScoreStore, PersistenceError, encode_best, parse_best};

/// Best score kept in a single file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BestScoreStore for FileStore {
    fn load_best(&self) -> Result<u32, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(parse_best(&text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    fn save_best(&mut self, best: u32) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write-then-rename: an interrupted save leaves the old value
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, encode_best(best)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
