//! In-memory backend.
//!
//! DashMap-backed and infallible. The default for ephemeral cellars and the
//! workhorse for tests.

use crate::store::Store;
use cellar_core::StoreError;
use dashmap::DashMap;

/// In-process store over a concurrent map.
///
/// Never returns an error. Entries live as long as the store itself;
/// nothing touches disk.
///
/// # Thread Safety
///
/// Reads are lock-free via DashMap; writes only lock the target shard.
///
/// # Example
///
/// ```ignore
/// use cellar_storage::{MemoryStore, Store};
///
/// let store = MemoryStore::new();
/// store.set("greeting", "\"hello\"")?;
/// assert_eq!(store.get("greeting")?.as_deref(), Some("\"hello\""));
/// ```
#[derive(Debug)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, text: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), text.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.entries.remove(key).is_some())
    }
}
