//! Core types and traits for the land ledger
//!
//! This crate defines the foundational types shared by every layer:
//! - Key / TypeTag: ordered store keys, one tag per record family
//! - CompositeKey / IndexNamespace: escaped `(namespace, value, id)` index keys
//! - Parcel, Project, Milestone, ProjectStatus: domain records
//! - Version, HistoryRecord, HistoryEntry: version and history contract
//! - LedgerError / StoreError: error taxonomy
//! - RecordStore: the storage seam the ledger runs against
//! - validation: argument parsing helpers

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod composite;
pub mod contract;
pub mod error;
pub mod key;
pub mod traits;
pub mod types;
pub mod validation;

pub use composite::{CompositeKey, IndexNamespace, KeyError};
pub use contract::{HistoryEntry, HistoryRecord, Version};
pub use error::{LedgerError, Result, StoreError, StoreResult};
pub use key::{Key, TypeTag};
pub use traits::{RecordStore, ScanIter};
pub use types::{Coordinate, Indexed, Milestone, Parcel, Project, ProjectStatus};
