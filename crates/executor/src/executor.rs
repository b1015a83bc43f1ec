//! The Executor - single entry point to the ledger.
//!
//! The Executor is a stateless dispatcher that routes commands to the parcel
//! registry or the project ledger and converts results to outputs.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use landledger_registry::{LedgerConfig, ParcelRegistry, ProjectLedger};
use landledger_storage::VersionedStore;

use crate::bridge::Services;
use crate::handlers::{parcel as parcels, project as projects};
use crate::{Command, Output, Result};

/// The command executor - single entry point to the ledger.
///
/// The Executor is **stateless**: it holds the shared store and the two
/// services but keeps no state of its own. Every command runs in exactly one
/// store invocation, so it either commits completely or leaves no trace.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and can be shared across threads.
///
/// # Example
///
/// ```
/// use landledger_executor::{Command, Executor, Output};
///
/// let executor = Executor::in_memory();
/// executor
///     .execute(Command::RegisterParcel {
///         parcel: r#"{"parcelId":"P1","owner":"alice"}"#.into(),
///     })
///     .unwrap();
///
/// let out = executor.execute(Command::ParcelExists { id: "P1".into() }).unwrap();
/// assert_eq!(out, Output::Bool(true));
/// ```
#[derive(Clone)]
pub struct Executor {
    services: Services,
}

impl Executor {
    /// Create an executor over a shared store with the given ledger switches.
    pub fn new(store: Arc<VersionedStore>, config: LedgerConfig) -> Self {
        Self {
            services: Services::new(store, Arc::new(config)),
        }
    }

    /// Executor over a fresh in-memory store with default switches.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(VersionedStore::new()), LedgerConfig::default())
    }

    /// Executor over a fresh in-memory store, switches read from `path`.
    ///
    /// A missing file is created with the defaults first.
    pub fn with_config_file(path: &Path) -> Result<Self> {
        LedgerConfig::write_default_if_missing(path)?;
        let config = LedgerConfig::from_file(path)?;
        debug!(target: "landledger::executor", path = %path.display(), ?config, "config loaded");
        Ok(Self::new(Arc::new(VersionedStore::new()), config))
    }

    /// The store commands commit to.
    pub fn store(&self) -> &Arc<VersionedStore> {
        &self.services.store
    }

    /// The parcel registry commands dispatch to.
    pub fn parcels(&self) -> &ParcelRegistry {
        &self.services.parcels
    }

    /// The project ledger commands dispatch to.
    pub fn projects(&self) -> &ProjectLedger {
        &self.services.projects
    }

    /// Execute a single command.
    ///
    /// Returns the command result or an error.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        let name = cmd.name();
        debug!(target: "landledger::executor", command = name, "dispatch");
        let s = &self.services;

        let result = match cmd {
            // Parcel commands
            Command::RegisterParcel { parcel } => parcels::register(s, parcel),
            Command::GetParcel { id } => parcels::get(s, id),
            Command::ParcelExists { id } => parcels::exists(s, id),
            Command::ListParcels => parcels::list(s),
            Command::QueryByOwner { owner } => parcels::query_by_owner(s, owner),
            Command::QueryByTitle { title } => parcels::query_by_title(s, title),
            Command::TransferOwner { id, new_owner } => parcels::transfer_owner(s, id, new_owner),
            Command::UpdateDescription { id, description } => {
                parcels::update_description(s, id, description)
            }
            Command::UpdateGeometry {
                id,
                coordinates,
                area,
            } => parcels::update_geometry(s, id, coordinates, area),
            Command::VerifyParcel { id, verified } => parcels::verify(s, id, verified),
            Command::DeleteParcel { id } => parcels::delete(s, id),
            Command::ParcelHistory { id } => parcels::history(s, id),

            // Project commands
            Command::CreateProject { project } => projects::create(s, project),
            Command::GetProject { id } => projects::get(s, id),
            Command::ProjectExists { id } => projects::exists(s, id),
            Command::ListProjects => projects::list(s),
            Command::ListProjectsByParcel { parcel_id } => projects::list_by_parcel(s, parcel_id),
            Command::ListProjectsByOwner { owner } => projects::list_by_owner(s, owner),
            Command::Vote { id, voter } => projects::vote(s, id, voter),
            Command::Fund { id, amount } => projects::fund(s, id, amount),
            Command::UpdateStatus { id, status } => projects::update_status(s, id, status),
            Command::SetContractor { id, contractor } => projects::set_contractor(s, id, contractor),
            Command::AddMilestone { id, label, amount } => {
                projects::add_milestone(s, id, label, amount)
            }
            Command::ReleaseMilestone { id, label } => projects::release_milestone(s, id, label),
            Command::DeleteProject { id } => projects::delete(s, id),
            Command::ProjectHistory { id } => projects::history(s, id),
        };

        match &result {
            Ok(out) => debug!(target: "landledger::executor", command = name, output = out.kind(), "done"),
            Err(e) => debug!(target: "landledger::executor", command = name, code = e.code(), "command failed"),
        }
        result
    }

    /// Execute multiple commands sequentially.
    ///
    /// Each command runs in its own invocation; a failure does not stop or
    /// undo the others.
    pub fn execute_many(&self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd)).collect()
    }

    /// Named entry point with positional text arguments.
    ///
    /// Returns the JSON-rendered result (empty for mutations).
    ///
    /// ```
    /// use landledger_executor::Executor;
    ///
    /// let executor = Executor::in_memory();
    /// let out = executor.invoke("Exists", &["P1".to_string()]).unwrap();
    /// assert_eq!(out, "false");
    /// ```
    pub fn invoke(&self, name: &str, args: &[String]) -> Result<String> {
        let cmd = Command::from_invocation(name, args)?;
        self.execute(cmd)?.to_json()
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("version", &self.services.store.current_version())
            .finish_non_exhaustive()
    }
}
