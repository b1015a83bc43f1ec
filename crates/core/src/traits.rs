//! The record store seam
//!
//! The ledger never owns storage. Every operation runs against a
//! [`RecordStore`] handed in by the caller, typically one invocation of a
//! versioned store. The store is responsible for making all reads and writes of
//! that invocation commit together or not at all; the ledger relies on this for
//! its multi-step index maintenance and performs no compensation of its own.

use crate::contract::HistoryRecord;
use crate::error::StoreResult;
use crate::key::Key;

/// Single-pass iterator over `(key, value)` pairs in key order
pub type ScanIter<'a> = Box<dyn Iterator<Item = StoreResult<(Key, Vec<u8>)>> + 'a>;

/// Ordered key/value storage with prefix scans and per-key version history
///
/// Methods take `&mut self` because implementations track what an invocation
/// read for conflict detection.
pub trait RecordStore {
    /// Current value of `key`, or `None` if absent
    fn get(&mut self, key: &Key) -> StoreResult<Option<Vec<u8>>>;

    /// Write `value` under `key`
    fn put(&mut self, key: Key, value: Vec<u8>) -> StoreResult<()>;

    /// Remove `key`; removing an absent key is not an error
    fn delete(&mut self, key: &Key) -> StoreResult<()>;

    /// Every live key starting with `prefix`, in key order
    ///
    /// The iterator is finite and can be consumed once.
    fn scan_prefix(&mut self, prefix: &Key) -> StoreResult<ScanIter<'_>>;

    /// Committed versions of `key`, **oldest first**
    ///
    /// Deletions appear as tombstone records. A key that was never written
    /// has an empty history.
    fn version_history(&mut self, key: &Key) -> StoreResult<Vec<HistoryRecord>>;

    /// True if `key` currently has a value
    fn exists(&mut self, key: &Key) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}
