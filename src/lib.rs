//! # Cellar
//!
//! Persistent state cells over pluggable key-value storage.
//!
//! A cell pairs an in-memory value with a JSON-encoded mirror in a backing
//! store. It hydrates from the store once at construction, falls back to a
//! caller-supplied initial value when the entry is absent or unreadable, and
//! rewrites the entry on every update. Storage and codec failures never
//! reach the caller: they are logged and the cell keeps serving the best
//! value it has.
//!
//! ## Quick Start
//!
//! ```ignore
//! use cellar::prelude::*;
//!
//! // Open a file-backed cellar; values survive restarts
//! let cellar = Cellar::open("./state")?;
//!
//! // Absent key: the initial value applies
//! let name = cellar.cell("name", "Rick".to_string());
//! assert_eq!(name.get(), "Rick");
//!
//! // Updates land in memory first, then in storage
//! name.set("updated".to_string());
//! name.modify(|prev| format!("{}!", prev));
//!
//! // A later run hydrates from what was persisted
//! let name = cellar.cell("name", "Rick".to_string());
//! assert_eq!(name.get(), "updated!");
//! ```
//!
//! ## Layout
//!
//! - [`Cellar`]: a bound storage medium that mints cells
//! - [`PersistentCell`]: the value/updater primitive
//! - `cellar-storage`: the [`Store`] trait plus memory, file, and quota
//!   backends
//! - `cellar-core`: error taxonomy and the JSON text codec

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cell;
pub mod cellar;
pub mod prelude;

// Re-export main entry points
pub use crate::cell::{CellUpdater, PersistentCell, Update};
pub use crate::cellar::Cellar;

// Re-export the layers cells are built on
pub use cellar_core::{CodecError, ReadError, StoreError, WriteError};
pub use cellar_storage::{FileStore, MemoryStore, QuotaStore, Store};
