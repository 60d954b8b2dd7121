//! JSON text codec for stored values.
//!
//! Every value lives in its backing store as one JSON document of text.
//! These helpers are the single place where serde_json errors map into the
//! cellar error taxonomy.

use crate::error::CodecError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encode a value into the JSON text stored at a key.
pub fn encode<T: Serialize>(value: &T) -> Result<String, CodecError> {
    serde_json::to_string(value).map_err(|e| CodecError::Encode(e.to_string()))
}

/// Decode stored JSON text into a typed value.
pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T, CodecError> {
    serde_json::from_str(text).map_err(|e| CodecError::Decode(e.to_string()))
}
