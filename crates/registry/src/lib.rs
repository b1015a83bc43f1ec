//! Land parcel registry and project ledger
//!
//! The services in this crate own no storage. Each operation takes the
//! [`RecordStore`](landledger_core::RecordStore) of one invocation and relies
//! on it to commit every read and write of that operation together.
//!
//! - [`IndexManager`]: composite-key secondary indexes
//! - [`ParcelRegistry`]: parcel ownership lifecycle
//! - [`ProjectLedger`]: funding and milestone state machine
//! - [`history`]: per-entity history replay
//! - [`LedgerConfig`]: `landledger.toml` switches

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod config;
pub mod history;
pub mod index;
pub mod parcel;
pub mod project;

pub use config::{LedgerConfig, CONFIG_FILE_NAME};
pub use index::IndexManager;
pub use parcel::ParcelRegistry;
pub use project::ProjectLedger;
