//! PersistentCell: storage-synchronized value cells
//!
//! ## Design
//!
//! 1. **Hydrate once**: a cell reads its key exactly once, at construction.
//! 2. **Memory first**: an update lands in memory before the backing store,
//!    and exactly one store write follows per update.
//! 3. **Failures stay inside**: read and write failures are logged and
//!    swallowed; the cell keeps serving the best value it has.
//!
//! A cell whose write failed holds a value newer than its stored entry.
//! Nothing reconciles that on its own: the cell serves the newer value for
//! the rest of its life, and the stored entry wins again at the next
//! hydration.
//!
//! Cells bound to the same key do not coordinate. Each hydrates its own
//! copy, each write clobbers the shared entry, and none of them hears about
//! the others' updates: last writer wins.

use cellar_core::{codec, ReadError, WriteError};
use cellar_storage::Store;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Read the text at `key` and decode it, distinguishing absence from failure.
fn load<T: DeserializeOwned>(store: &dyn Store, key: &str) -> Result<Option<T>, ReadError> {
    match store.get(key)? {
        Some(text) => Ok(Some(codec::decode(&text)?)),
        None => Ok(None),
    }
}

/// Encode `value` and write it at `key`.
fn persist<T: Serialize>(store: &dyn Store, key: &str, value: &T) -> Result<(), WriteError> {
    let text = codec::encode(value)?;
    store.set(key, &text)?;
    Ok(())
}

/// The next value for a cell: a literal replacement, or a function of the
/// previous value.
///
/// # Example
///
/// ```ignore
/// cell.update(Update::value(5));
/// cell.update(Update::compute(|prev| prev + 1));
/// ```
pub enum Update<T> {
    /// Replace the value outright.
    Value(T),
    /// Compute the next value from the previous one.
    Compute(Box<dyn FnOnce(&T) -> T>),
}

impl<T> Update<T> {
    /// Literal replacement.
    pub fn value(value: T) -> Self {
        Update::Value(value)
    }

    /// Next value computed from the previous one.
    pub fn compute(f: impl FnOnce(&T) -> T + 'static) -> Self {
        Update::Compute(Box::new(f))
    }

    fn resolve(self, prev: &T) -> T {
        match self {
            Update::Value(value) => value,
            Update::Compute(f) => f(prev),
        }
    }
}

/// Shared state behind a cell and every handle cloned from it.
struct CellInner<T> {
    key: String,
    store: Arc<dyn Store>,
    value: RwLock<T>,
}

impl<T: Serialize> CellInner<T> {
    /// Resolve an update, install it in memory, then write it through.
    fn apply(&self, update: Update<T>) {
        let mut value = self.value.write();
        *value = update.resolve(&value);
        // Lock held across the write: this cell's store writes happen in
        // the same order as its in-memory updates.
        if let Err(e) = persist(self.store.as_ref(), &self.key, &*value) {
            warn!(
                "cell '{}': persist failed: {}; in-memory value kept",
                self.key, e
            );
        }
    }
}

/// A typed value kept in memory and mirrored as JSON text at a key in a
/// backing store.
///
/// ## Design
///
/// Construction reads the key once: stored text that decodes wins, anything
/// else (absent key, store failure, undecodable text) falls back to the
/// initial value. From then on the in-memory value is what the cell serves,
/// and every update rewrites the stored entry.
///
/// Failures never escape. A failed hydration or write is logged via
/// `tracing` and the cell keeps going; see [`PersistentCell::update`] for
/// what that means after a failed write.
///
/// Clones share state: cloning hands out another handle to the same cell,
/// it does not hydrate again.
///
/// # Example
///
/// ```ignore
/// use cellar::prelude::*;
///
/// let cellar = Cellar::ephemeral();
///
/// let name = cellar.cell("name", "Rick".to_string());
/// assert_eq!(name.get(), "Rick");
///
/// name.set("updated".to_string());
/// assert_eq!(name.get(), "updated");
/// ```
pub struct PersistentCell<T> {
    inner: Arc<CellInner<T>>,
}

impl<T> Clone for PersistentCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

// ========== Construction ==========

impl<T> PersistentCell<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create a cell at `key`, hydrated from `store`.
    ///
    /// The stored text is read exactly once. `initial` becomes the value
    /// when the key is absent; it also becomes the value when the read or
    /// the decode fails, in which case the failure is logged and swallowed.
    ///
    /// Construction never writes: an absent key stays absent until the
    /// first update.
    pub fn new(store: Arc<dyn Store>, key: impl Into<String>, initial: T) -> Self {
        let key = key.into();
        let value = match load(store.as_ref(), &key) {
            Ok(Some(stored)) => {
                debug!("cell '{}': hydrated from store", key);
                stored
            }
            Ok(None) => initial,
            Err(e) => {
                warn!("cell '{}': hydration failed: {}; using initial value", key, e);
                initial
            }
        };
        Self {
            inner: Arc::new(CellInner {
                key,
                store,
                value: RwLock::new(value),
            }),
        }
    }
}

// ========== Updates ==========

impl<T: Serialize> PersistentCell<T> {
    /// Apply an update: resolve the next value, install it in memory, then
    /// persist it.
    ///
    /// The in-memory value changes first and unconditionally. Exactly one
    /// store write follows per call, never batched with other updates. If
    /// the encode or the write fails, the failure is logged and the cell
    /// keeps the new value unpersisted, so memory and store diverge until
    /// the next successful write or the next hydration.
    pub fn update(&self, update: Update<T>) {
        self.inner.apply(update);
    }

    /// Replace the value. Shorthand for [`Update::Value`].
    pub fn set(&self, value: T) {
        self.update(Update::Value(value));
    }

    /// Compute the next value from the previous one. Shorthand for
    /// [`Update::compute`].
    pub fn modify(&self, f: impl FnOnce(&T) -> T + 'static) {
        self.update(Update::compute(f));
    }
}

// ========== Accessors ==========

impl<T: Clone> PersistentCell<T> {
    /// Clone of the current in-memory value. Never touches the store.
    pub fn get(&self) -> T {
        self.inner.value.read().clone()
    }

    /// Split into the conventional pair: the value as of this moment plus
    /// an updater handle.
    ///
    /// The value half is a snapshot. The updater half shares the live cell
    /// state with every other handle and can be cloned freely.
    pub fn into_pair(self) -> (T, CellUpdater<T>) {
        let current = self.inner.value.read().clone();
        (current, CellUpdater { inner: self.inner })
    }
}

impl<T> PersistentCell<T> {
    /// The storage key this cell is bound to.
    pub fn key(&self) -> &str {
        &self.inner.key
    }
}

/// Write half of a cell, produced by [`PersistentCell::into_pair`].
///
/// Shares state with the cell it came from; updates go through the same
/// memory-first, swallow-on-failure path.
pub struct CellUpdater<T> {
    inner: Arc<CellInner<T>>,
}

impl<T> Clone for CellUpdater<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Serialize> CellUpdater<T> {
    /// Apply an update. See [`PersistentCell::update`].
    pub fn update(&self, update: Update<T>) {
        self.inner.apply(update);
    }

    /// Replace the value. Shorthand for [`Update::Value`].
    pub fn set(&self, value: T) {
        self.update(Update::Value(value));
    }

    /// Compute the next value from the previous one. Shorthand for
    /// [`Update::compute`].
    pub fn modify(&self, f: impl FnOnce(&T) -> T + 'static) {
        self.update(Update::compute(f));
    }
}

impl<T> CellUpdater<T> {
    /// The storage key the underlying cell is bound to.
    pub fn key(&self) -> &str {
        &self.inner.key
    }
}
