//! Cross-session counters
//!
//! Integer counters that survive between runs (e.g. lifetime gems collected).
//! - `MemoryCounterStore`: process-lifetime only, for tests and embedding
//! - `JsonCounterStore`: a JSON object on disk, rewritten on every change

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from a counter backend
#[derive(Debug, Error)]
pub enum CounterStoreError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Counter file is not a JSON object of integers
    #[error("counter file corrupted: {0}")]
    Corrupted(#[from] serde_json::Error),
}

/// Persistent integer counters keyed by name. Missing keys read as 0.
pub trait CounterStore {
    fn get(&self, key: &str) -> i64;
    fn set(&mut self, key: &str, value: i64) -> Result<(), CounterStoreError>;

    /// Read-increment-write; returns the new value
    fn increment(&mut self, key: &str) -> Result<i64, CounterStoreError> {
        let value = self.get(key) + 1;
        self.set(key, value)?;
        Ok(value)
    }
}

/// In-memory counters
#[derive(Debug, Default, Clone)]
pub struct MemoryCounterStore {
    counters: BTreeMap<String, i64>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CounterStore for MemoryCounterStore {
    fn get(&self, key: &str) -> i64 {
        self.counters.get(key).copied().unwrap_or(0)
    }

    fn set(&mut self, key: &str, value: i64) -> Result<(), CounterStoreError> {
        self.counters.insert(key.to_string(), value);
        Ok(())
    }
}

/// Counters persisted to a JSON file
#[derive(Debug, Clone)]
pub struct JsonCounterStore {
    path: PathBuf,
    counters: BTreeMap<String, i64>,
}

impl JsonCounterStore {
    /// Open the store at `path`; a missing file starts empty
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CounterStoreError> {
        let path = path.into();
        let counters = match fs::read_to_string(&path) {
            Ok(json) => {
                let counters: BTreeMap<String, i64> = serde_json::from_str(&json)?;
                log::info!("Loaded {} counters from {}", counters.len(), path.display());
                counters
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No counter file at {}, starting fresh", path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, counters })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), CounterStoreError> {
        let json = serde_json::to_string_pretty(&self.counters)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl CounterStore for JsonCounterStore {
    fn get(&self, key: &str) -> i64 {
        self.counters.get(key).copied().unwrap_or(0)
    }

    fn set(&mut self, key: &str, value: i64) -> Result<(), CounterStoreError> {
        self.counters.insert(key.to_string(), value);
        self.save()
    }
}
