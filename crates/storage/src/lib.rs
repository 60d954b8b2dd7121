//! Storage backends for cellar
//!
//! This crate defines the capability trait cells write through, plus the
//! built-in backends:
//! - `Store`: synchronous key-value text storage, object safe
//! - `MemoryStore`: DashMap-backed, never fails
//! - `FileStore`: one file per key under a root directory
//! - `QuotaStore`: byte-budget decorator over any inner store
//!
//! Backends deal in raw text only. Encoding typed values into that text is
//! the cell's job, which keeps custom `Store` implementations trivial.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod file;
pub mod memory;
pub mod quota;
pub mod store;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use quota::QuotaStore;
pub use store::Store;

// Implementors need the error type; save them the extra dependency edge.
pub use cellar_core::StoreError;
