//! LandLedger - land parcel registry and crowdfunding project ledger
//!
//! Parcels carry ownership, geometry and a verification flag. Projects are
//! funding campaigns anchored to a parcel, with votes, a balance and a
//! milestone schedule. Both live in a versioned record store, so every
//! record keeps its full history.
//!
//! # Quick Start
//!
//! ```
//! use landledger::{Command, Executor, Output};
//!
//! let ledger = Executor::in_memory();
//! ledger
//!     .invoke("RegisterParcel", &[r#"{"parcelId":"P1","owner":"alice"}"#.to_string()])
//!     .unwrap();
//! ledger.invoke("TransferOwner", &["P1".to_string(), "bob".to_string()]).unwrap();
//!
//! match ledger.execute(Command::QueryByOwner { owner: "bob".into() }).unwrap() {
//!     Output::Parcels(parcels) => assert_eq!(parcels[0].id, "P1"),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Executor`], which runs each command in one
//! atomic store invocation. Storage, indexing and the services themselves
//! are internal crates; only the executor API is re-exported here.

pub use landledger_executor::*;
