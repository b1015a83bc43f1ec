//! History reconstruction
//!
//! Replays a key's version log into decoded snapshots, oldest first. One entry
//! per committed version; a deleted entity ends with a tombstone entry.
//! A version whose payload no longer decodes is reported with no snapshot
//! rather than failing the whole history.

use serde::de::DeserializeOwned;
use tracing::warn;

use landledger_core::{HistoryEntry, Key, RecordStore, Result};

/// Decode every committed version of `key`
///
/// A key that was never written has an empty history.
pub fn replay<T, S>(store: &mut S, key: &Key) -> Result<Vec<HistoryEntry<T>>>
where
    T: DeserializeOwned,
    S: RecordStore + ?Sized,
{
    let records = store.version_history(key)?;
    let entries = records
        .into_iter()
        .map(|record| match record.value {
            None => HistoryEntry::tombstone(record.version, record.timestamp),
            Some(bytes) => {
                let snapshot = match serde_json::from_slice::<T>(&bytes) {
                    Ok(v) => Some(v),
                    Err(e) => {
                        warn!(
                            target: "landledger::history",
                            %key,
                            version = %record.version,
                            error = %e,
                            "history snapshot failed to decode"
                        );
                        None
                    }
                };
                HistoryEntry::snapshot(record.version, record.timestamp, snapshot)
            }
        })
        .collect();
    Ok(entries)
}
