//! Project ledger: the funding and milestone state machine
//!
//! `funded` only rises through [`ProjectLedger::fund`] and only falls through
//! [`ProjectLedger::release_milestone`], which moves each milestone from
//! unreleased to released at most once.
//!
//! ## Key Design
//!
//! - Primary record: `TypeTag::Project` + project id
//! - Indexes: `ProjectParcel` (parcel id) and `ProjectOwner` (owner)
//!
//! Neither indexed field changes after creation, so indexes are written on
//! create and removed on delete only.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use landledger_core::validation::{parse_amount, require_non_empty, validate_id};
use landledger_core::{
    HistoryEntry, IndexNamespace, Key, LedgerError, Milestone, Project, ProjectStatus, RecordStore,
    Result, TypeTag,
};

use crate::codec::{from_stored, to_stored};
use crate::config::LedgerConfig;
use crate::history::replay;
use crate::index::IndexManager;

/// Ledger of crowdfunding projects
#[derive(Debug, Clone)]
pub struct ProjectLedger {
    config: Arc<LedgerConfig>,
    indexes: IndexManager,
}

impl ProjectLedger {
    /// Create a ledger governed by `config`
    pub fn new(config: Arc<LedgerConfig>) -> Self {
        Self {
            config,
            indexes: IndexManager::new(),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    fn key_for(id: &str) -> Key {
        Key::project(id)
    }

    fn load<S: RecordStore + ?Sized>(store: &mut S, id: &str) -> Result<Project> {
        let key = Self::key_for(id);
        match store.get(&key)? {
            Some(bytes) => from_stored(&key, &bytes),
            None => Err(LedgerError::not_found(format!("project {} not found", id))),
        }
    }

    /// Persist `project` with a fresh `updatedAt`
    fn touch_and_save<S: RecordStore + ?Sized>(store: &mut S, project: &mut Project) -> Result<()> {
        project.updated_at = Some(Utc::now());
        store.put(Self::key_for(&project.id), to_stored(project)?)?;
        Ok(())
    }

    fn check_new_milestones(&self, project: &Project) -> Result<()> {
        let mut seen = HashSet::new();
        for m in &project.milestones {
            require_non_empty("milestone label", &m.label)?;
            if m.amount == 0 {
                return Err(LedgerError::invalid_argument(format!(
                    "milestone '{}' amount must be positive",
                    m.label
                )));
            }
            if m.released {
                return Err(LedgerError::invalid_argument(format!(
                    "milestone '{}' cannot be created released",
                    m.label
                )));
            }
            if self.config.unique_milestone_labels && !seen.insert(m.label.as_str()) {
                return Err(LedgerError::already_exists(format!(
                    "milestone '{}' appears twice in project {}",
                    m.label, project.id
                )));
            }
        }
        Ok(())
    }

    // ========== Create ==========

    /// Create a project
    ///
    /// Starts unfunded with no voters; timestamps default to now. With status
    /// transitions enforced the initial status must be `created`.
    pub fn create<S: RecordStore + ?Sized>(&self, store: &mut S, mut project: Project) -> Result<Project> {
        validate_id("projectId", &project.id)?;
        require_non_empty("parcelId", &project.parcel_id)?;
        require_non_empty("owner", &project.owner)?;
        if project.funded != 0 {
            return Err(LedgerError::invalid_argument(format!(
                "project {} cannot start with funded {}",
                project.id, project.funded
            )));
        }
        if !project.voters.is_empty() {
            return Err(LedgerError::invalid_argument(format!(
                "project {} cannot start with {} voter(s)",
                project.id,
                project.voters.len()
            )));
        }
        if self.config.enforce_status_transitions && project.status != ProjectStatus::Created {
            return Err(LedgerError::invalid_argument(format!(
                "project {} must start as {}, not {}",
                project.id,
                ProjectStatus::Created,
                project.status
            )));
        }
        self.check_new_milestones(&project)?;

        if store.exists(&Self::key_for(&project.id))? {
            return Err(LedgerError::already_exists(format!(
                "project {} already exists",
                project.id
            )));
        }
        if self.config.require_existing_parcel && !store.exists(&Key::parcel(&project.parcel_id))? {
            return Err(LedgerError::not_found(format!(
                "parcel {} not found",
                project.parcel_id
            )));
        }

        let now = Utc::now();
        let created_at = *project.created_at.get_or_insert(now);
        if project.updated_at.is_none() {
            project.updated_at = Some(created_at);
        }

        store.put(Self::key_for(&project.id), to_stored(&project)?)?;
        self.indexes.add_indexes(store, &project)?;
        info!(
            target: "landledger::project",
            id = %project.id,
            parcel = %project.parcel_id,
            owner = %project.owner,
            goal = project.goal,
            "project created"
        );
        Ok(project)
    }

    // ========== Read ==========

    /// Current record of `id`
    pub fn get<S: RecordStore + ?Sized>(&self, store: &mut S, id: &str) -> Result<Project> {
        Self::load(store, id)
    }

    /// True if `id` exists
    pub fn exists<S: RecordStore + ?Sized>(&self, store: &mut S, id: &str) -> Result<bool> {
        Ok(store.exists(&Self::key_for(id))?)
    }

    /// Every project in id order, skipping records that fail to decode
    pub fn list<S: RecordStore + ?Sized>(&self, store: &mut S) -> Result<Vec<Project>> {
        let mut out = Vec::new();
        for entry in store.scan_prefix(&Key::prefix(TypeTag::Project))? {
            let (key, bytes) = entry?;
            match serde_json::from_slice::<Project>(&bytes) {
                Ok(project) if !project.id.is_empty() => out.push(project),
                Ok(_) => warn!(target: "landledger::project", %key, "skipping project without id"),
                Err(e) => warn!(target: "landledger::project", %key, error = %e, "skipping undecodable project"),
            }
        }
        Ok(out)
    }

    /// Projects anchored to `parcel_id`
    pub fn list_by_parcel<S: RecordStore + ?Sized>(&self, store: &mut S, parcel_id: &str) -> Result<Vec<Project>> {
        self.query(store, IndexNamespace::ProjectParcel, parcel_id)
    }

    /// Projects owned by `owner`
    pub fn list_by_owner<S: RecordStore + ?Sized>(&self, store: &mut S, owner: &str) -> Result<Vec<Project>> {
        self.query(store, IndexNamespace::ProjectOwner, owner)
    }

    fn query<S: RecordStore + ?Sized>(
        &self,
        store: &mut S,
        namespace: IndexNamespace,
        value: &str,
    ) -> Result<Vec<Project>> {
        let ids = self.indexes.lookup(store, namespace, value)?;
        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            match Self::load(store, &id) {
                Ok(project) => out.push(project),
                Err(LedgerError::NotFound(_)) => {
                    warn!(target: "landledger::project", %namespace, value, %id, "index entry points at missing project");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(out)
    }

    // ========== Voting & Funding ==========

    /// Record a vote; voting twice is a no-op
    pub fn vote<S: RecordStore + ?Sized>(&self, store: &mut S, id: &str, voter: &str) -> Result<()> {
        require_non_empty("voter", voter)?;
        let mut project = Self::load(store, id)?;
        if !project.add_voter(voter) {
            debug!(target: "landledger::project", id, voter, "repeat vote ignored");
            return Ok(());
        }
        Self::touch_and_save(store, &mut project)?;
        info!(target: "landledger::project", id, voter, votes = project.voters.len(), "vote recorded");
        Ok(())
    }

    /// Add a positive amount, given as text, to the funded balance
    pub fn fund<S: RecordStore + ?Sized>(&self, store: &mut S, id: &str, amount: &str) -> Result<()> {
        let amount = parse_amount("amount", amount)?;
        let mut project = Self::load(store, id)?;
        project.fund(amount)?;
        Self::touch_and_save(store, &mut project)?;
        info!(target: "landledger::project", id, amount, funded = project.funded, "project funded");
        Ok(())
    }

    // ========== Status & Contractor ==========

    /// Move the project to `status`
    pub fn update_status<S: RecordStore + ?Sized>(&self, store: &mut S, id: &str, status: &str) -> Result<()> {
        let next: ProjectStatus = status.parse()?;
        let mut project = Self::load(store, id)?;
        let current = project.status;
        if current == next {
            debug!(target: "landledger::project", id, %current, "status unchanged");
            return Ok(());
        }
        if self.config.enforce_status_transitions && !current.can_transition_to(next) {
            let reason = if current.is_terminal() { " (terminal status)" } else { "" };
            return Err(LedgerError::invalid_argument(format!(
                "project {} cannot move from {} to {}{}",
                id, current, next, reason
            )));
        }
        project.status = next;
        Self::touch_and_save(store, &mut project)?;
        info!(target: "landledger::project", id, from = %current, to = %next, "status changed");
        Ok(())
    }

    /// Assign the contractor
    pub fn set_contractor<S: RecordStore + ?Sized>(&self, store: &mut S, id: &str, contractor: &str) -> Result<()> {
        require_non_empty("contractor", contractor)?;
        let mut project = Self::load(store, id)?;
        project.contractor = contractor.to_string();
        Self::touch_and_save(store, &mut project)?;
        info!(target: "landledger::project", id, contractor, "contractor set");
        Ok(())
    }

    // ========== Milestones ==========

    /// Append an unreleased milestone
    pub fn add_milestone<S: RecordStore + ?Sized>(
        &self,
        store: &mut S,
        id: &str,
        label: &str,
        amount: &str,
    ) -> Result<()> {
        require_non_empty("label", label)?;
        let amount = parse_amount("milestone amount", amount)?;
        let mut project = Self::load(store, id)?;
        if self.config.unique_milestone_labels && project.milestone(label).is_some() {
            return Err(LedgerError::already_exists(format!(
                "milestone '{}' already exists in project {}",
                label, id
            )));
        }
        project.milestones.push(Milestone {
            label: label.to_string(),
            amount,
            released: false,
        });
        Self::touch_and_save(store, &mut project)?;
        info!(target: "landledger::project", id, label, amount, "milestone added");
        Ok(())
    }

    /// Release the first milestone labelled `label`, paying it out of the balance
    ///
    /// Releasing an already released milestone is a no-op.
    pub fn release_milestone<S: RecordStore + ?Sized>(&self, store: &mut S, id: &str, label: &str) -> Result<()> {
        require_non_empty("label", label)?;
        let mut project = Self::load(store, id)?;
        if !project.release_milestone(label)? {
            debug!(target: "landledger::project", id, label, "milestone already released");
            return Ok(());
        }
        Self::touch_and_save(store, &mut project)?;
        info!(target: "landledger::project", id, label, funded = project.funded, "milestone released");
        Ok(())
    }

    // ========== Delete ==========

    /// Delete `id` and its index entries
    pub fn delete<S: RecordStore + ?Sized>(&self, store: &mut S, id: &str) -> Result<()> {
        let project = Self::load(store, id)?;
        store.delete(&Self::key_for(id))?;
        self.indexes.remove_indexes(store, &project)?;
        info!(target: "landledger::project", id, "project deleted");
        Ok(())
    }

    // ========== History ==========

    /// Every committed version of `id`, oldest first
    pub fn history<S: RecordStore + ?Sized>(&self, store: &mut S, id: &str) -> Result<Vec<HistoryEntry<Project>>> {
        replay(store, &Self::key_for(id))
    }
}

impl Default for ProjectLedger {
    fn default() -> Self {
        Self::new(Arc::new(LedgerConfig::default()))
    }
}
