//! Persistent solve history, most recent first.
//!
//! History is one JSON list under a single key. Reads that fail to parse are treated as empty
//! history and writes that fail are logged; neither is reported to the caller.

use super::record::SolveRecord;
use crate::error::StoreError;

use log::{error, warn};
use std::path::PathBuf;

/// A key-value slot holding the serialised history.
pub trait HistoryStore {
    /// Read the stored text, `None` if nothing was ever written.
    fn load(&self) -> Result<Option<String>, StoreError>;

    /// Replace the stored text.
    fn save(&mut self, data: &str) -> Result<(), StoreError>;
}

/// History kept in memory only.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    data: Option<String>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store already holding `data`.
    pub fn with_data(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
        }
    }
}

impl HistoryStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.data.clone())
    }

    fn save(&mut self, data: &str) -> Result<(), StoreError> {
        self.data = Some(data.to_string());
        Ok(())
    }
}

/// History kept in a JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store history at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HistoryStore for FileStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, data: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, data)?;
        Ok(())
    }
}

/// The list of finished solves, capped at a fixed size.
#[derive(Debug)]
pub struct SolveHistory<S: HistoryStore> {
    store: S,
    capacity: usize,
}

impl<S: HistoryStore> SolveHistory<S> {
    /// Wrap a store, keeping at most `capacity` solves.
    pub fn new(store: S, capacity: usize) -> Self {
        Self { store, capacity }
    }

    /// Every stored solve, most recent first.
    pub fn read_all(&self) -> Vec<SolveRecord> {
        match self.try_read() {
            Ok(records) => records,
            Err(e) => {
                error!("discarding unreadable solve history: {e}");
                Vec::new()
            }
        }
    }

    fn try_read(&self) -> Result<Vec<SolveRecord>, StoreError> {
        match self.store.load()? {
            Some(text) => Ok(serde_json::from_str(&text)?),
            None => Ok(Vec::new()),
        }
    }

    fn write(&mut self, records: &[SolveRecord]) {
        let result = serde_json::to_string(records)
            .map_err(StoreError::from)
            .and_then(|text| self.store.save(&text));
        if let Err(e) = result {
            warn!("could not save solve history: {e}");
        }
    }

    /// Add a solve to the front, dropping the oldest beyond capacity.
    pub fn append(&mut self, record: SolveRecord) {
        let mut records = self.read_all();
        records.insert(0, record);
        records.truncate(self.capacity);
        self.write(&records);
    }

    /// Remove the solve at `index` (0 is the most recent).
    pub fn delete_at(&mut self, index: usize) -> Option<SolveRecord> {
        let mut records = self.read_all();
        if index >= records.len() {
            return None;
        }
        let removed = records.remove(index);
        self.write(&records);
        Some(removed)
    }

    /// Remove every solve.
    pub fn clear_all(&mut self) {
        self.write(&[]);
    }

    /// Number of stored solves.
    pub fn len(&self) -> usize {
        self.read_all().len()
    }

    /// Whether no solves are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The fastest stored solve.
    pub fn best(&self) -> Option<SolveRecord> {
        self.read_all().into_iter().min_by_key(|r| r.total_time)
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
