//! One invocation against the versioned store
//!
//! An [`Invocation`] is the unit of atomicity. It reads from the snapshot it
//! was started at, buffers every write, and is either committed whole by
//! [`VersionedStore::commit`] or dropped.
//!
//! Read rules:
//! - own buffered writes are visible first (read-your-writes)
//! - everything else comes from the snapshot and is recorded in the read-set
//! - own writes are not recorded, they cannot conflict with themselves

use std::collections::{BTreeMap, HashMap};

use landledger_core::{HistoryRecord, Key, RecordStore, ScanIter, StoreResult, Version};

use crate::store::VersionedStore;

/// Buffered write: `Some` puts a value, `None` deletes
pub type PendingWrite = Option<Vec<u8>>;

/// An open invocation
pub struct Invocation<'a> {
    store: &'a VersionedStore,
    snapshot: Version,
    read_set: HashMap<Key, Version>,
    write_set: BTreeMap<Key, PendingWrite>,
}

impl<'a> Invocation<'a> {
    pub(crate) fn new(store: &'a VersionedStore, snapshot: Version) -> Self {
        Invocation {
            store,
            snapshot,
            read_set: HashMap::new(),
            write_set: BTreeMap::new(),
        }
    }

    /// Version this invocation reads at
    pub fn snapshot(&self) -> Version {
        self.snapshot
    }

    /// Number of buffered writes
    pub fn pending_writes(&self) -> usize {
        self.write_set.len()
    }

    /// Number of keys read from the snapshot
    pub fn read_count(&self) -> usize {
        self.read_set.len()
    }

    /// True if nothing has been written
    pub fn is_read_only(&self) -> bool {
        self.write_set.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Version, HashMap<Key, Version>, BTreeMap<Key, PendingWrite>) {
        (self.snapshot, self.read_set, self.write_set)
    }

    fn record_read(&mut self, key: &Key, version: Version) {
        self.read_set.entry(key.clone()).or_insert(version);
    }
}

impl RecordStore for Invocation<'_> {
    fn get(&mut self, key: &Key) -> StoreResult<Option<Vec<u8>>> {
        if let Some(pending) = self.write_set.get(key) {
            return Ok(pending.clone());
        }
        let (value, version) = self.store.read_at(key, self.snapshot);
        self.record_read(key, version);
        Ok(value)
    }

    fn put(&mut self, key: Key, value: Vec<u8>) -> StoreResult<()> {
        self.write_set.insert(key, Some(value));
        Ok(())
    }

    fn delete(&mut self, key: &Key) -> StoreResult<()> {
        self.write_set.insert(key.clone(), None);
        Ok(())
    }

    fn scan_prefix(&mut self, prefix: &Key) -> StoreResult<ScanIter<'_>> {
        let mut merged: BTreeMap<Key, Vec<u8>> = BTreeMap::new();

        for (key, value, version) in self.store.scan_at(prefix, self.snapshot) {
            if !self.write_set.contains_key(&key) {
                self.read_set.entry(key.clone()).or_insert(version);
                merged.insert(key, value);
            }
        }

        for (key, pending) in self.write_set.range(prefix.clone()..) {
            if !key.starts_with(prefix) {
                break;
            }
            if let Some(value) = pending {
                merged.insert(key.clone(), value.clone());
            }
        }

        Ok(Box::new(merged.into_iter().map(Ok)))
    }

    fn version_history(&mut self, key: &Key) -> StoreResult<Vec<HistoryRecord>> {
        Ok(self.store.history_at(key, self.snapshot))
    }
}

impl std::fmt::Debug for Invocation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invocation")
            .field("snapshot", &self.snapshot)
            .field("reads", &self.read_set.len())
            .field("writes", &self.write_set.len())
            .finish()
    }
}
