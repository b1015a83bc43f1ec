//! Storage-layer version entry
//!
//! A [`StoredValue`] is one version of one key: the bytes written (or a
//! tombstone), the commit version and the commit time.

use chrono::{DateTime, Utc};

use landledger_core::{HistoryRecord, Version};

/// One committed version of a key
#[derive(Debug, Clone, PartialEq)]
pub struct StoredValue {
    value: Option<Vec<u8>>,
    version: Version,
    timestamp: DateTime<Utc>,
}

impl StoredValue {
    /// A live value written at `version`
    pub fn new(value: Vec<u8>, version: Version, timestamp: DateTime<Utc>) -> Self {
        StoredValue {
            value: Some(value),
            version,
            timestamp,
        }
    }

    /// A deletion marker written at `version`
    pub fn tombstone(version: Version, timestamp: DateTime<Utc>) -> Self {
        StoredValue {
            value: None,
            version,
            timestamp,
        }
    }

    /// Stored bytes, `None` for a tombstone
    #[inline]
    pub fn value(&self) -> Option<&[u8]> {
        self.value.as_deref()
    }

    /// Commit version
    #[inline]
    pub fn version(&self) -> Version {
        self.version
    }

    /// Commit time
    #[inline]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// True if this version deleted the key
    #[inline]
    pub fn is_tombstone(&self) -> bool {
        self.value.is_none()
    }

    /// Contract form handed to history readers
    pub fn to_history_record(&self) -> HistoryRecord {
        HistoryRecord {
            version: self.version,
            timestamp: self.timestamp,
            value: self.value.clone(),
        }
    }
}
