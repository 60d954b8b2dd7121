//! Main entry point: a storage medium that mints cells.
//!
//! `Cellar` binds exactly one backing store and hands out
//! [`PersistentCell`]s against it. Every cell minted from the same cellar
//! shares the same medium, so cells on the same key see each other's writes
//! at their next hydration.

use crate::cell::PersistentCell;
use cellar_core::StoreError;
use cellar_storage::{FileStore, MemoryStore, Store};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// A bound storage medium.
///
/// This is the usual way into the crate. Open a cellar once, then mint as
/// many cells against it as you need. Cloning a cellar clones the handle,
/// not the medium.
///
/// # Example
///
/// ```ignore
/// use cellar::prelude::*;
///
/// // File-backed: values survive restarts
/// let cellar = Cellar::open("./state")?;
///
/// let name = cellar.cell("name", "Rick".to_string());
/// name.set("updated".to_string());
///
/// // In-memory: nothing touches disk
/// let scratch = Cellar::ephemeral();
/// let counter = scratch.cell("counter", 0_i64);
/// counter.modify(|prev| prev + 1);
/// ```
#[derive(Clone)]
pub struct Cellar {
    store: Arc<dyn Store>,
}

impl Cellar {
    /// Open a file-backed cellar rooted at `path`, creating the directory
    /// if needed.
    ///
    /// Opening the medium is host-environment setup and stays fallible;
    /// only cell operations swallow their failures.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let store = FileStore::open(path)?;
        Ok(Self {
            store: Arc::new(store),
        })
    }

    /// Create an in-memory cellar.
    ///
    /// No files, no recovery: every value is gone when the last handle
    /// drops. Suited to tests and session-scoped state.
    pub fn ephemeral() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
        }
    }

    /// Create a cellar over a custom backend.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use cellar::prelude::*;
    /// use std::sync::Arc;
    ///
    /// let store = Arc::new(QuotaStore::new(MemoryStore::new(), 4096));
    /// let cellar = Cellar::with_store(store);
    /// ```
    pub fn with_store(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Mint a cell at `key` with an explicit initial value.
    ///
    /// Hydrates from the medium immediately; see [`PersistentCell::new`]
    /// for the fallback rules.
    pub fn cell<T>(&self, key: impl Into<String>, initial: T) -> PersistentCell<T>
    where
        T: Serialize + DeserializeOwned,
    {
        PersistentCell::new(Arc::clone(&self.store), key, initial)
    }

    /// Mint a cell at `key` falling back to `T::default()`.
    ///
    /// The spelling for "no particular initial value": an absent or
    /// unreadable entry yields an empty value rather than an invented one.
    pub fn cell_or_default<T>(&self, key: impl Into<String>) -> PersistentCell<T>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        self.cell(key, T::default())
    }

    /// The backing store this cellar mints cells against.
    pub fn store(&self) -> Arc<dyn Store> {
        Arc::clone(&self.store)
    }
}
