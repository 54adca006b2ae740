use std::collections::VecDeque;

use crate::persist::{JsonStorage, PersistenceError, StoreRecord};

/// Default bound on the history list.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Persisted pick history and favorites.
///
/// Loaded once at startup and flushed synchronously after every mutation so
/// an abrupt process end loses nothing. Exclusive access is enforced by
/// `&mut self`; a host that can call concurrently has to add its own lock
/// around the owner.
pub struct Store {
    favorites: Vec<String>,
    /// Newest first, no duplicates.
    history: VecDeque<String>,
    history_capacity: usize,
    storage: JsonStorage,
}

impl Store {
    /// Loads the store from `storage`, starting empty when nothing can be
    /// read.
    pub fn open(storage: JsonStorage) -> Self {
        Self::open_with_capacity(storage, DEFAULT_HISTORY_CAPACITY)
    }

    pub fn open_with_capacity(storage: JsonStorage, history_capacity: usize) -> Self {
        let record = storage.load_or_default();
        tracing::debug!(
            "store loaded: {} history entries, {} favorites",
            record.history.len(),
            record.favorites.len()
        );
        Self {
            favorites: record.favorites,
            history: record.history.into(),
            history_capacity,
            storage,
        }
    }

    /// Moves `definition` to the front of the history, dropping any older
    /// duplicate and trimming the tail past capacity.
    ///
    /// Re-adding the current head is a no-op: removing and re-inserting the
    /// front entry would only churn the store file.
    pub fn add_history(&mut self, definition: &str) -> Result<(), PersistenceError> {
        if self.history.front().is_some_and(|head| head == definition) {
            return Ok(());
        }
        self.history.retain(|entry| entry != definition);
        self.history.push_front(definition.to_string());
        while self.history.len() > self.history_capacity {
            // Normally at most one entry over, but this also shrinks an
            // oversized list after a capacity change.
            self.history.pop_back();
        }
        self.flush()
    }

    /// Appends `definition` to the favorites; already-present definitions
    /// are skipped.
    pub fn add_favorite(&mut self, definition: &str) -> Result<(), PersistenceError> {
        if self.favorites.iter().any(|entry| entry == definition) {
            return Ok(());
        }
        self.favorites.push(definition.to_string());
        self.flush()
    }

    /// Removes the first favorite equal to `definition`; absent definitions
    /// are a no-op.
    pub fn remove_favorite(&mut self, definition: &str) -> Result<(), PersistenceError> {
        let Some(index) = self.favorites.iter().position(|entry| entry == definition) else {
            return Ok(());
        };
        self.favorites.remove(index);
        self.flush()
    }

    /// Reorders a favorite. Out-of-range positions are a no-op.
    pub fn move_favorite(&mut self, from: usize, to: usize) -> Result<(), PersistenceError> {
        if from == to || from >= self.favorites.len() || to >= self.favorites.len() {
            return Ok(());
        }
        let entry = self.favorites.remove(from);
        self.favorites.insert(to, entry);
        self.flush()
    }

    /// History entries, most recent first, optionally narrowed to those
    /// containing `search` (case-sensitive).
    pub fn history<'a>(&'a self, search: Option<&'a str>) -> impl Iterator<Item = &'a str> {
        filtered(self.history.iter(), search)
    }

    /// Favorites in their stored order, same filter contract as history.
    pub fn favorites<'a>(&'a self, search: Option<&'a str>) -> impl Iterator<Item = &'a str> {
        filtered(self.favorites.iter(), search)
    }

    fn flush(&self) -> Result<(), PersistenceError> {
        let record = StoreRecord {
            favorites: self.favorites.clone(),
            history: self.history.iter().cloned().collect(),
        };
        self.storage.save(&record)
    }
}

fn filtered<'a>(
    entries: impl Iterator<Item = &'a String>,
    search: Option<&'a str>,
) -> impl Iterator<Item = &'a str> {
    entries
        .map(String::as_str)
        .filter(move |entry| search.is_none_or(|term| entry.contains(term)))
}
