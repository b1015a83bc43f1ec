//! Per-key version chains
//!
//! Versions are stored newest-first so snapshot reads find the most recent
//! version `<=` the snapshot with a short forward scan. History is handed out
//! oldest-first, which is the order the ledger contract pins.

use std::collections::VecDeque;

use landledger_core::Version;

use crate::stored_value::StoredValue;

/// Version chain for one key, newest first
#[derive(Debug, Clone)]
pub struct VersionChain {
    /// VecDeque gives O(1) push_front for new versions
    versions: VecDeque<StoredValue>,
}

impl VersionChain {
    /// Create a chain holding a single version
    pub fn new(value: StoredValue) -> Self {
        let mut versions = VecDeque::with_capacity(4);
        versions.push_front(value);
        Self { versions }
    }

    /// Add a version; it must be newer than every existing one
    #[inline]
    pub fn push(&mut self, value: StoredValue) {
        debug_assert!(
            self.latest().map_or(true, |l| l.version() < value.version()),
            "versions must be pushed in increasing order"
        );
        self.versions.push_front(value);
    }

    /// Newest version at or before `max_version`, tombstones included
    pub fn get_at_version(&self, max_version: Version) -> Option<&StoredValue> {
        self.versions.iter().find(|sv| sv.version() <= max_version)
    }

    /// Live value visible at `max_version`
    pub fn value_at(&self, max_version: Version) -> Option<&StoredValue> {
        self.get_at_version(max_version)
            .filter(|sv| !sv.is_tombstone())
    }

    /// Newest version
    #[inline]
    pub fn latest(&self) -> Option<&StoredValue> {
        self.versions.front()
    }

    /// Version of the newest entry, `Version::ZERO` for an empty chain
    pub fn latest_version(&self) -> Version {
        self.latest().map(|sv| sv.version()).unwrap_or(Version::ZERO)
    }

    /// True if the newest entry is a live value
    pub fn is_live(&self) -> bool {
        self.latest().is_some_and(|sv| !sv.is_tombstone())
    }

    /// Number of versions stored
    pub fn version_count(&self) -> usize {
        self.versions.len()
    }

    /// Versions at or before `max_version`, oldest first
    pub fn history_ascending(&self, max_version: Version) -> Vec<&StoredValue> {
        self.versions
            .iter()
            .rev()
            .take_while(|sv| sv.version() <= max_version)
            .collect()
    }
}
