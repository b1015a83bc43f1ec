//! Versioned record store
//!
//! `VersionedStore` keeps every key's full version chain in a `BTreeMap`
//! behind a `parking_lot::RwLock`, with a global `AtomicU64` commit counter.
//!
//! # Commit protocol
//!
//! 1. `begin()` captures the current version as the invocation snapshot
//! 2. the invocation reads from the snapshot and buffers its writes
//! 3. `commit()` takes the commit mutex, then the write lock, validates the
//!    read-set and, if clean, applies every buffered write at one new version
//!
//! The version counter is bumped while the write lock is held, so a reader
//! that observes version N also observes every write committed at N.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use landledger_core::{HistoryRecord, Key, Result, StoreError, StoreResult, Version};

use crate::invocation::Invocation;
use crate::stored_value::StoredValue;
use crate::validation::validate_read_set;
use crate::version_chain::VersionChain;

/// In-memory versioned record store
pub struct VersionedStore {
    data: RwLock<BTreeMap<Key, VersionChain>>,
    version: AtomicU64,
    commit_lock: Mutex<()>,
}

impl VersionedStore {
    /// Create an empty store at `Version::ZERO`
    pub fn new() -> Self {
        Self {
            data: RwLock::new(BTreeMap::new()),
            version: AtomicU64::new(0),
            commit_lock: Mutex::new(()),
        }
    }

    /// Latest committed version
    pub fn current_version(&self) -> Version {
        Version::new(self.version.load(Ordering::Acquire))
    }

    /// Number of keys with at least one version, tombstoned keys included
    pub fn key_count(&self) -> usize {
        self.data.read().len()
    }

    /// Start an invocation reading at the current version
    pub fn begin(&self) -> Invocation<'_> {
        let snapshot = self.current_version();
        debug!(target: "landledger::store", snapshot = %snapshot, "invocation begin");
        Invocation::new(self, snapshot)
    }

    /// Validate and apply an invocation
    ///
    /// Returns the version the writes were committed at, or `None` if the
    /// invocation changed nothing. On conflict nothing is applied.
    pub fn commit(&self, invocation: Invocation<'_>) -> StoreResult<Option<Version>> {
        let (snapshot, read_set, write_set) = invocation.into_parts();

        if write_set.is_empty() {
            debug!(target: "landledger::store", snapshot = %snapshot, "read-only invocation committed");
            return Ok(None);
        }

        let _commit_guard = self.commit_lock.lock();
        let mut data = self.data.write();

        let validation = validate_read_set(&read_set, &data);
        if let Some(conflict) = validation.first() {
            warn!(
                target: "landledger::store",
                snapshot = %snapshot,
                conflicts = validation.conflict_count(),
                key = %conflict.key(),
                "invocation aborted on conflict"
            );
            return Err(StoreError::Conflict {
                key: conflict.key().clone(),
            });
        }

        // Deleting a key that is already absent is not a change.
        let effective: Vec<(Key, Option<Vec<u8>>)> = write_set
            .into_iter()
            .filter(|(key, value)| {
                value.is_some() || data.get(key).is_some_and(VersionChain::is_live)
            })
            .collect();

        if effective.is_empty() {
            debug!(target: "landledger::store", snapshot = %snapshot, "invocation had no effective writes");
            return Ok(None);
        }

        let commit_version = Version::new(self.version.load(Ordering::Acquire) + 1);
        let timestamp = Utc::now();
        let writes = effective.len();

        for (key, value) in effective {
            let entry = match value {
                Some(bytes) => StoredValue::new(bytes, commit_version, timestamp),
                None => StoredValue::tombstone(commit_version, timestamp),
            };
            match data.get_mut(&key) {
                Some(chain) => chain.push(entry),
                None => {
                    data.insert(key, VersionChain::new(entry));
                }
            }
        }

        self.version.store(commit_version.as_u64(), Ordering::Release);
        debug!(
            target: "landledger::store",
            version = %commit_version,
            writes,
            "invocation committed"
        );
        Ok(Some(commit_version))
    }

    /// Run `f` inside one invocation: commit on `Ok`, discard on `Err`
    ///
    /// This is the atomic boundary every ledger operation runs in. Nothing is
    /// retried; a conflict surfaces as `LedgerError::StoreIO`.
    pub fn invoke<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Invocation<'_>) -> Result<T>,
    {
        let mut invocation = self.begin();
        match f(&mut invocation) {
            Ok(value) => {
                self.commit(invocation)?;
                Ok(value)
            }
            Err(e) => {
                debug!(
                    target: "landledger::store",
                    code = e.code(),
                    pending_writes = invocation.pending_writes(),
                    "invocation discarded"
                );
                Err(e)
            }
        }
    }

    /// Latest committed value of `key`, outside any invocation
    pub fn get_committed(&self, key: &Key) -> Option<Vec<u8>> {
        self.data
            .read()
            .get(key)
            .and_then(|chain| chain.latest())
            .and_then(|sv| sv.value().map(<[u8]>::to_vec))
    }

    pub(crate) fn read_at(&self, key: &Key, snapshot: Version) -> (Option<Vec<u8>>, Version) {
        let data = self.data.read();
        match data.get(key).and_then(|chain| chain.get_at_version(snapshot)) {
            Some(sv) => (sv.value().map(<[u8]>::to_vec), sv.version()),
            None => (None, Version::ZERO),
        }
    }

    /// Live keys under `prefix` at `snapshot` with the version each was read at
    pub(crate) fn scan_at(&self, prefix: &Key, snapshot: Version) -> Vec<(Key, Vec<u8>, Version)> {
        let data = self.data.read();
        data.range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .filter_map(|(key, chain)| {
                chain.value_at(snapshot).and_then(|sv| {
                    sv.value()
                        .map(|bytes| (key.clone(), bytes.to_vec(), sv.version()))
                })
            })
            .collect()
    }

    pub(crate) fn history_at(&self, key: &Key, snapshot: Version) -> Vec<HistoryRecord> {
        let data = self.data.read();
        data.get(key)
            .map(|chain| {
                chain
                    .history_ascending(snapshot)
                    .into_iter()
                    .map(StoredValue::to_history_record)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for VersionedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VersionedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionedStore")
            .field("version", &self.current_version())
            .field("keys", &self.key_count())
            .finish()
    }
}
