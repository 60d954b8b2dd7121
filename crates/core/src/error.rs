//! Canonical error types for cellar operations.
//!
//! Failures come from two layers: the backing store ([`StoreError`]) and the
//! JSON codec ([`CodecError`]). [`ReadError`] and [`WriteError`] combine them
//! into the two shapes a cell can hit. Cells catch and log these instead of
//! propagating them; backend constructors return them directly.

use thiserror::Error;

/// Failures reported by a backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The medium rejected a write that would exceed its capacity.
    #[error("quota exceeded: entry of {requested} bytes over a {limit} byte budget")]
    QuotaExceeded {
        /// Bytes the rejected entry would occupy.
        requested: usize,
        /// The configured budget in bytes.
        limit: usize,
    },

    /// The medium cannot be reached or refused the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// I/O error from a file-backed medium.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Build an [`StoreError::Unavailable`] from any message.
    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable(message.into())
    }
}

/// Failures converting between typed values and stored JSON text.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The value could not be represented as JSON text.
    #[error("encode error: {0}")]
    Encode(String),

    /// The stored text could not be decoded into the requested type.
    #[error("decode error: {0}")]
    Decode(String),
}

/// A failed attempt to hydrate a cell from its backing store.
///
/// Cells recover from this by falling back to their initial value.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The store could not produce the text at the key.
    #[error("store read failed: {0}")]
    Store(#[from] StoreError),

    /// Text was present at the key but could not be decoded.
    #[error("stored text invalid: {0}")]
    Decode(#[from] CodecError),
}

/// A failed attempt to persist a cell's value.
///
/// Cells recover from this by keeping the in-memory value unpersisted.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The value could not be encoded for storage.
    #[error("value not encodable: {0}")]
    Encode(#[from] CodecError),

    /// The store rejected the write.
    #[error("store write failed: {0}")]
    Store(#[from] StoreError),
}
