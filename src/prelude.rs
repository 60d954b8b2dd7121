//! Convenient imports for cellar.
//!
//! Re-exports the commonly used surface so one import gets you going:
//!
//! ```ignore
//! use cellar::prelude::*;
//!
//! let cellar = Cellar::open("./state")?;
//! let name = cellar.cell("name", "Rick".to_string());
//! ```

// Main entry point
pub use crate::cellar::Cellar;

// The cell primitive
pub use crate::cell::{CellUpdater, PersistentCell, Update};

// Storage capability and backends
pub use cellar_storage::{FileStore, MemoryStore, QuotaStore, Store};

// Errors surfaced by backend constructors and custom Store impls
pub use cellar_core::{CodecError, ReadError, StoreError, WriteError};

// Re-export serde_json for convenience
pub use serde_json::json;
