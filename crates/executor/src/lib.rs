//! # LandLedger Executor
//!
//! Command layer over the parcel registry and project ledger.
//!
//! It provides:
//! - [`Command`]/[`Output`] - serializable request and result types (for hosts)
//! - [`Executor`] - runs each command in one atomic store invocation
//! - [`Executor::invoke`] - named entry points with text arguments, JSON out
//!
//! ## Quick Start
//!
//! ```text
//! use landledger_executor::Executor;
//!
//! let executor = Executor::in_memory();
//! executor.invoke("RegisterParcel", &[r#"{"parcelId":"P1","owner":"alice"}"#.into()])?;
//! executor.invoke("TransferOwner", &["P1".into(), "bob".into()])?;
//! let parcels = executor.invoke("QueryByOwner", &["bob".into()])?;
//! ```
//!
//! ## Entry Points
//!
//! | Service | Entry points |
//! |---------|--------------|
//! | **Parcels** | RegisterParcel, GetParcel, Exists, GetAllParcels, QueryByOwner, QueryByTitle, TransferOwner, UpdateDescription, UpdateGeometry, VerifyParcel, DeleteParcel, GetHistory |
//! | **Projects** | CreateProject, GetProject, ProjectExists, ListProjects, ListProjectsByParcel, ListProjectsByOwner, Vote, Fund, UpdateProjectStatus, SetContractor, AddMilestone, ReleaseMilestone, DeleteProject, GetProjectHistory |

#![warn(missing_docs)]

pub(crate) mod bridge;
mod command;
mod executor;
mod output;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything users need is re-exported here
// =============================================================================

pub use command::Command;
pub use executor::Executor;
pub use output::Output;

pub use landledger_core::{
    Coordinate, HistoryEntry, LedgerError, Milestone, Parcel, Project, ProjectStatus, Version,
};
pub use landledger_registry::{LedgerConfig, CONFIG_FILE_NAME};
pub use landledger_storage::VersionedStore;

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, LedgerError>;
