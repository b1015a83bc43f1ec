//! Record payload encoding
//!
//! Records are stored as field-named JSON. Two decode paths exist because a
//! bad payload means different things depending on where it came from:
//! - caller input that fails to parse is `InvalidArgument`
//! - a stored record that fails to parse is `StoreIO`

use serde::de::DeserializeOwned;
use serde::Serialize;

use landledger_core::{Key, LedgerError, Result};

/// Value stored under every index marker key
pub const INDEX_MARKER: &[u8] = &[0];

/// Serialize a record for storage
pub fn to_stored<T: Serialize>(record: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(record)
        .map_err(|e| LedgerError::store_io(format!("failed to encode record: {}", e)))
}

/// Deserialize a record read from `key`
pub fn from_stored<T: DeserializeOwned>(key: &Key, bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes)
        .map_err(|e| LedgerError::store_io(format!("corrupt record at {}: {}", key, e)))
}

/// Deserialize a caller-supplied payload
pub fn from_payload<T: DeserializeOwned>(what: &str, json: &str) -> Result<T> {
    serde_json::from_str(json)
        .map_err(|e| LedgerError::invalid_argument(format!("invalid {} JSON: {}", what, e)))
}
