//! Core types for cellar
//!
//! This crate holds the storage-agnostic pieces every other layer builds on:
//! - Error taxonomy: store, codec, read, write
//! - JSON text codec between typed values and stored text
//!
//! Backends live in `cellar-storage`; the cell primitive lives in the root
//! crate on top of both.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod error;

pub use codec::{decode, encode};
pub use error::{CodecError, ReadError, StoreError, WriteError};
