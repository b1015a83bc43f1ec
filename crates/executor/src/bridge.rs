//! Bridge module: the store and the ledger services commands run against.
//!
//! [`Services`] bundles the shared [`VersionedStore`] with the two ledger
//! services. Handlers receive it by reference and open exactly one store
//! invocation per command.

use std::sync::Arc;

use landledger_registry::{LedgerConfig, ParcelRegistry, ProjectLedger};
use landledger_storage::VersionedStore;

/// Everything a handler needs to run a command.
#[derive(Clone)]
pub struct Services {
    /// Shared versioned record store
    pub store: Arc<VersionedStore>,
    /// Parcel ownership lifecycle
    pub parcels: ParcelRegistry,
    /// Funding and milestone state machine
    pub projects: ProjectLedger,
}

impl Services {
    /// Build both services over `store`
    pub fn new(store: Arc<VersionedStore>, config: Arc<LedgerConfig>) -> Self {
        Self {
            store,
            parcels: ParcelRegistry::new(),
            projects: ProjectLedger::new(config),
        }
    }
}
