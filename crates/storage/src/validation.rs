//! Commit-time conflict detection
//!
//! First-committer-wins on the read-set:
//! - every key an invocation read from its snapshot must still be at the
//!   version it saw when the invocation commits
//! - blind writes (written, never read) do not conflict
//! - keys that were absent when read are recorded at `Version::ZERO`, so a
//!   concurrent create of the same key is caught

use std::collections::{BTreeMap, HashMap};

use landledger_core::{Key, Version};

use crate::version_chain::VersionChain;

/// A single detected conflict
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictType {
    /// Key was read at one version but a later commit changed it
    ReadWriteConflict {
        /// Conflicting key
        key: Key,
        /// Version recorded in the read-set
        read_version: Version,
        /// Latest committed version at validation time
        current_version: Version,
    },
}

impl ConflictType {
    /// Key the conflict is about
    pub fn key(&self) -> &Key {
        match self {
            ConflictType::ReadWriteConflict { key, .. } => key,
        }
    }
}

/// Outcome of validating one invocation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// Every conflict found
    pub conflicts: Vec<ConflictType>,
}

impl ValidationResult {
    /// No conflicts
    pub fn ok() -> Self {
        ValidationResult {
            conflicts: Vec::new(),
        }
    }

    /// True if the invocation may commit
    pub fn is_valid(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Number of conflicts
    pub fn conflict_count(&self) -> usize {
        self.conflicts.len()
    }

    /// First conflict, if any
    pub fn first(&self) -> Option<&ConflictType> {
        self.conflicts.first()
    }
}

/// Check every read-set entry against the latest committed version
pub fn validate_read_set(
    read_set: &HashMap<Key, Version>,
    data: &BTreeMap<Key, VersionChain>,
) -> ValidationResult {
    let mut result = ValidationResult::ok();

    for (key, read_version) in read_set {
        let current_version = data
            .get(key)
            .map(VersionChain::latest_version)
            .unwrap_or(Version::ZERO);

        if current_version != *read_version {
            result.conflicts.push(ConflictType::ReadWriteConflict {
                key: key.clone(),
                read_version: *read_version,
                current_version,
            });
        }
    }

    result
}
