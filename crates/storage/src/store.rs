//! The backing-store capability trait.

use cellar_core::StoreError;

/// A synchronous key-value text store.
///
/// This is everything a cell needs from its environment: read the text at a
/// key, replace it, remove it. Implementations must be shareable across
/// threads; cells hold them behind `Arc<dyn Store>`.
///
/// All three operations are fallible. Cells recover from failures on their
/// own (fall back to the initial value on a failed read, keep the in-memory
/// value on a failed write), so implementations should report errors rather
/// than panic.
///
/// # Example
///
/// ```ignore
/// use cellar_storage::{Store, StoreError};
///
/// struct NullStore;
///
/// impl Store for NullStore {
///     fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
///         Ok(None)
///     }
///     fn set(&self, _key: &str, _text: &str) -> Result<(), StoreError> {
///         Err(StoreError::unavailable("writes not supported"))
///     }
///     fn remove(&self, _key: &str) -> Result<bool, StoreError> {
///         Ok(false)
///     }
/// }
/// ```
pub trait Store: Send + Sync {
    /// Read the text stored at `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `text` at `key`, replacing any previous entry.
    fn set(&self, key: &str, text: &str) -> Result<(), StoreError>;

    /// Remove the entry at `key`. Returns `true` if it existed.
    fn remove(&self, key: &str) -> Result<bool, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_is_object_safe() {
        fn _assert_object_safe(_: &dyn Store) {}
    }
}
