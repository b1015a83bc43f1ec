//! Secondary index maintenance
//!
//! Each index entry is a valueless marker stored under the encoded
//! `(namespace, field value, entity id)` composite key. A query by field value
//! is a prefix scan over `(namespace, field value)`.
//!
//! Every change to an indexed field must be bracketed inside one invocation:
//!
//! ```text
//! remove_indexes(old) -> mutate -> add_indexes(new)
//! ```
//!
//! [`IndexManager::reindex`] does exactly that and touches only the fields
//! whose value changed.

use tracing::{debug, warn};

use landledger_core::{CompositeKey, IndexNamespace, Indexed, RecordStore, Result};

use crate::codec::INDEX_MARKER;

/// Writes, removes and resolves index markers
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexManager;

impl IndexManager {
    /// Create an index manager
    pub fn new() -> Self {
        IndexManager
    }

    /// Write the marker for `(namespace, value, entity_id)`; empty values are not indexed
    pub fn add<S: RecordStore + ?Sized>(
        &self,
        store: &mut S,
        namespace: IndexNamespace,
        value: &str,
        entity_id: &str,
    ) -> Result<()> {
        if value.is_empty() {
            return Ok(());
        }
        let key = CompositeKey::new(namespace, value, entity_id).to_key();
        store.put(key, INDEX_MARKER.to_vec())?;
        debug!(target: "landledger::index", %namespace, value, entity_id, "index entry added");
        Ok(())
    }

    /// Delete the marker for `(namespace, value, entity_id)`
    pub fn remove<S: RecordStore + ?Sized>(
        &self,
        store: &mut S,
        namespace: IndexNamespace,
        value: &str,
        entity_id: &str,
    ) -> Result<()> {
        if value.is_empty() {
            return Ok(());
        }
        let key = CompositeKey::new(namespace, value, entity_id).to_key();
        store.delete(&key)?;
        debug!(target: "landledger::index", %namespace, value, entity_id, "index entry removed");
        Ok(())
    }

    /// Ids of every entity indexed under `(namespace, value)`, in id order
    pub fn lookup<S: RecordStore + ?Sized>(
        &self,
        store: &mut S,
        namespace: IndexNamespace,
        value: &str,
    ) -> Result<Vec<String>> {
        let prefix = CompositeKey::prefix(namespace, value);
        let mut ids = Vec::new();
        for entry in store.scan_prefix(&prefix)? {
            let (key, _) = entry?;
            match CompositeKey::from_key(&key) {
                Ok(ck) if ck.namespace == namespace && ck.value == value => ids.push(ck.entity_id),
                Ok(ck) => {
                    warn!(target: "landledger::index", %key, found = %ck.namespace, "index entry outside scanned prefix");
                }
                Err(e) => {
                    warn!(target: "landledger::index", %key, error = %e, "skipping malformed index entry");
                }
            }
        }
        Ok(ids)
    }

    /// Write every index marker of `entity`
    pub fn add_indexes<S, E>(&self, store: &mut S, entity: &E) -> Result<()>
    where
        S: RecordStore + ?Sized,
        E: Indexed,
    {
        for (namespace, value) in entity.index_fields() {
            self.add(store, namespace, value, entity.entity_id())?;
        }
        Ok(())
    }

    /// Delete every index marker of `entity` for its current field values
    pub fn remove_indexes<S, E>(&self, store: &mut S, entity: &E) -> Result<()>
    where
        S: RecordStore + ?Sized,
        E: Indexed,
    {
        for (namespace, value) in entity.index_fields() {
            self.remove(store, namespace, value, entity.entity_id())?;
        }
        Ok(())
    }

    /// Move the markers of one entity from `old` field values to `new` ones
    ///
    /// All stale markers are removed before any new marker is written.
    pub fn reindex<S, E>(&self, store: &mut S, old: &E, new: &E) -> Result<()>
    where
        S: RecordStore + ?Sized,
        E: Indexed,
    {
        let old_fields = old.index_fields();
        let new_fields = new.index_fields();
        let changed: Vec<_> = old_fields
            .iter()
            .zip(new_fields.iter())
            .filter(|(o, n)| o != n)
            .collect();

        for ((namespace, value), _) in &changed {
            self.remove(store, *namespace, value, old.entity_id())?;
        }
        for (_, (namespace, value)) in &changed {
            self.add(store, *namespace, value, new.entity_id())?;
        }
        Ok(())
    }
}
