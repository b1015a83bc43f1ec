//! History records
//!
//! A [`HistoryRecord`] is what a store reports for one version of a key: raw
//! bytes, or `None` for a tombstone. A [`HistoryEntry`] is the same version
//! decoded into a domain snapshot. History is derived from the store's version
//! log; it is never stored separately.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Version;

/// One committed version of a key, as reported by the store
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    /// Commit version that produced this record
    pub version: Version,
    /// Commit time
    pub timestamp: DateTime<Utc>,
    /// Stored bytes, `None` if the key was deleted at this version
    pub value: Option<Vec<u8>>,
}

impl HistoryRecord {
    /// True if this version deleted the key
    pub fn is_tombstone(&self) -> bool {
        self.value.is_none()
    }
}

/// One decoded version of an entity
///
/// Serialized as `{ "txId", "timestamp", "isDelete", "value" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry<T> {
    /// Commit version of the snapshot
    #[serde(rename = "txId")]
    pub version: Version,
    /// Commit time
    pub timestamp: DateTime<Utc>,
    /// True if the entity was deleted at this version
    pub is_delete: bool,
    /// Snapshot, absent for tombstones and undecodable payloads
    pub value: Option<T>,
}

impl<T> HistoryEntry<T> {
    /// Entry for a version that deleted the entity
    pub fn tombstone(version: Version, timestamp: DateTime<Utc>) -> Self {
        HistoryEntry {
            version,
            timestamp,
            is_delete: true,
            value: None,
        }
    }

    /// Entry for a version carrying a snapshot (or `None` if it failed to decode)
    pub fn snapshot(version: Version, timestamp: DateTime<Utc>, value: Option<T>) -> Self {
        HistoryEntry {
            version,
            timestamp,
            is_delete: false,
            value,
        }
    }
}
