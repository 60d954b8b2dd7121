//! Byte-budget decorator.
//!
//! Wraps any store and rejects writes that would push the total size of
//! entries written through the wrapper past a fixed budget, the way
//! persistent media reject writes once full. Handy on its own, and the
//! backend of choice for exercising a cell's write-failure path
//! deterministically.

use crate::store::Store;
use cellar_core::StoreError;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Budget accounting: total bytes used plus per-key entry sizes.
struct Ledger {
    used: usize,
    sizes: HashMap<String, usize>,
}

/// Store wrapper enforcing a byte budget.
///
/// Entry cost is key bytes + text bytes. Replacing an entry frees the old
/// cost before the new one is charged; removing an entry frees it outright.
/// Only entries written through this wrapper are accounted: whatever the
/// inner store already held stays readable and uncounted.
///
/// # Example
///
/// ```ignore
/// use cellar_storage::{MemoryStore, QuotaStore, Store};
///
/// let store = QuotaStore::new(MemoryStore::new(), 64);
/// store.set("small", "1")?;
/// assert!(store.set("big", &"x".repeat(100)).is_err());
/// ```
pub struct QuotaStore<S> {
    inner: S,
    limit: usize,
    ledger: Mutex<Ledger>,
}

impl<S: Store> QuotaStore<S> {
    /// Wrap `inner` with a budget of `limit` bytes.
    pub fn new(inner: S, limit: usize) -> Self {
        Self {
            inner,
            limit,
            ledger: Mutex::new(Ledger {
                used: 0,
                sizes: HashMap::new(),
            }),
        }
    }

    /// The configured budget in bytes.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Bytes currently charged against the budget.
    pub fn used(&self) -> usize {
        self.ledger.lock().used
    }

    /// Unwrap and return the inner store.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Store> Store for QuotaStore<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, text: &str) -> Result<(), StoreError> {
        let cost = key.len() + text.len();
        // One lock across check and charge keeps the reservation atomic.
        let mut ledger = self.ledger.lock();
        let previous = ledger.sizes.get(key).copied().unwrap_or(0);
        let projected = ledger.used - previous + cost;
        if projected > self.limit {
            return Err(StoreError::QuotaExceeded {
                requested: cost,
                limit: self.limit,
            });
        }
        self.inner.set(key, text)?;
        ledger.used = projected;
        ledger.sizes.insert(key.to_string(), cost);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let mut ledger = self.ledger.lock();
        let removed = self.inner.remove(key)?;
        if removed {
            if let Some(size) = ledger.sizes.remove(key) {
                ledger.used -= size;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    #[test]
    fn test_within_budget_passes_through() {
        let store = QuotaStore::new(MemoryStore::new(), 64);
        store.set("key", "\"value\"").unwrap();
        assert_eq!(store.get("key").unwrap().as_deref(), Some("\"value\""));
        assert_eq!(store.used(), "key".len() + "\"value\"".len());
    }

    #[test]
    fn test_over_budget_rejected_and_inner_untouched() {
        let store = QuotaStore::new(MemoryStore::new(), 16);
        let result = store.set("key", &"x".repeat(100));

        assert!(matches!(
            result,
            Err(StoreError::QuotaExceeded { limit: 16, .. })
        ));
        assert!(store.get("key").unwrap().is_none());
        assert_eq!(store.used(), 0);
    }

    #[test]
    fn test_replacing_entry_frees_old_cost_first() {
        let store = QuotaStore::new(MemoryStore::new(), 24);
        store.set("key", &"a".repeat(20)).unwrap();

        // Same key, same size: fits because the old entry is released
        store.set("key", &"b".repeat(20)).unwrap();
        assert_eq!(store.get("key").unwrap().as_deref(), Some("b".repeat(20).as_str()));
    }

    #[test]
    fn test_remove_frees_budget() {
        let store = QuotaStore::new(MemoryStore::new(), 16);
        store.set("key", &"a".repeat(10)).unwrap();
        assert!(store.used() > 0);

        assert!(store.remove("key").unwrap());
        assert_eq!(store.used(), 0);

        store.set("key2", &"b".repeat(10)).unwrap();
    }

    #[test]
    fn test_preexisting_entries_readable_but_uncounted() {
        let inner = MemoryStore::new();
        inner.set("old", "\"kept\"").unwrap();

        let store = QuotaStore::new(inner, 16);
        assert_eq!(store.get("old").unwrap().as_deref(), Some("\"kept\""));
        assert_eq!(store.used(), 0);
    }

    #[test]
    fn test_budget_spans_keys() {
        let store = QuotaStore::new(MemoryStore::new(), 20);
        store.set("a", &"x".repeat(8)).unwrap(); // cost 9
        store.set("b", &"y".repeat(8)).unwrap(); // cost 9, total 18

        let result = store.set("c", &"z".repeat(8));
        assert!(matches!(result, Err(StoreError::QuotaExceeded { .. })));
    }
}
