//! Storage layer for the land ledger
//!
//! An in-memory, multi-version implementation of the record store contract:
//! - VersionChain: every version of a key, tombstones included
//! - VersionedStore: BTreeMap behind an RwLock with an AtomicU64 commit counter
//! - Invocation: snapshot reads, buffered writes, one atomic commit
//! - validation: first-committer-wins conflict detection on the read-set

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod invocation;
pub mod store;
pub mod stored_value;
pub mod validation;
pub mod version_chain;

pub use invocation::{Invocation, PendingWrite};
pub use store::VersionedStore;
pub use stored_value::StoredValue;
pub use validation::{validate_read_set, ConflictType, ValidationResult};
pub use version_chain::VersionChain;
