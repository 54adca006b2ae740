use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk shape of the store: two ordered string lists, loaded wholesale at
/// startup and rewritten wholesale on every save.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreRecord {
    pub favorites: Vec<String>,
    /// Newest first.
    pub history: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store format error: {0}")]
    Format(#[from] serde_json::Error),
}

/// Whole-record JSON persistence for the store file.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the record, falling back to an empty one when the file is
    /// missing or unreadable. A fresh install has no store file yet, and a
    /// corrupt one must not block startup.
    pub fn load_or_default(&self) -> StoreRecord {
        match self.load() {
            Ok(record) => record,
            Err(PersistenceError::Io(error))
                if error.kind() == std::io::ErrorKind::NotFound =>
            {
                StoreRecord::default()
            }
            Err(error) => {
                tracing::warn!(
                    "starting with an empty store, failed to load {}: {error}",
                    self.path.display()
                );
                StoreRecord::default()
            }
        }
    }

    pub fn load(&self) -> Result<StoreRecord, PersistenceError> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn save(&self, record: &StoreRecord) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(record)?)?;
        Ok(())
    }
}
