//! Project command handlers.

use landledger_core::Project;
use landledger_registry::codec::from_payload;

use crate::bridge::Services;
use crate::{Output, Result};

// =============================================================================
// Records
// =============================================================================

/// Handle CreateProject command.
pub fn create(s: &Services, project_json: String) -> Result<Output> {
    let project: Project = from_payload("project", &project_json)?;
    let project = s.store.invoke(|inv| s.projects.create(inv, project))?;
    Ok(Output::Project(project))
}

/// Handle GetProject command.
pub fn get(s: &Services, id: String) -> Result<Output> {
    let project = s.store.invoke(|inv| s.projects.get(inv, &id))?;
    Ok(Output::Project(project))
}

/// Handle ProjectExists command.
pub fn exists(s: &Services, id: String) -> Result<Output> {
    let found = s.store.invoke(|inv| s.projects.exists(inv, &id))?;
    Ok(Output::Bool(found))
}

/// Handle ListProjects command.
pub fn list(s: &Services) -> Result<Output> {
    let projects = s.store.invoke(|inv| s.projects.list(inv))?;
    Ok(Output::Projects(projects))
}

/// Handle ListProjectsByParcel command.
pub fn list_by_parcel(s: &Services, parcel_id: String) -> Result<Output> {
    let projects = s
        .store
        .invoke(|inv| s.projects.list_by_parcel(inv, &parcel_id))?;
    Ok(Output::Projects(projects))
}

/// Handle ListProjectsByOwner command.
pub fn list_by_owner(s: &Services, owner: String) -> Result<Output> {
    let projects = s.store.invoke(|inv| s.projects.list_by_owner(inv, &owner))?;
    Ok(Output::Projects(projects))
}

/// Handle DeleteProject command.
pub fn delete(s: &Services, id: String) -> Result<Output> {
    s.store.invoke(|inv| s.projects.delete(inv, &id))?;
    Ok(Output::Unit)
}

/// Handle ProjectHistory command.
pub fn history(s: &Services, id: String) -> Result<Output> {
    let entries = s.store.invoke(|inv| s.projects.history(inv, &id))?;
    Ok(Output::ProjectHistory(entries))
}

// =============================================================================
// Funding state machine
// =============================================================================

/// Handle Vote command.
pub fn vote(s: &Services, id: String, voter: String) -> Result<Output> {
    s.store.invoke(|inv| s.projects.vote(inv, &id, &voter))?;
    Ok(Output::Unit)
}

/// Handle Fund command.
pub fn fund(s: &Services, id: String, amount: String) -> Result<Output> {
    s.store.invoke(|inv| s.projects.fund(inv, &id, &amount))?;
    Ok(Output::Unit)
}

/// Handle UpdateStatus command.
pub fn update_status(s: &Services, id: String, status: String) -> Result<Output> {
    s.store
        .invoke(|inv| s.projects.update_status(inv, &id, &status))?;
    Ok(Output::Unit)
}

/// Handle SetContractor command.
pub fn set_contractor(s: &Services, id: String, contractor: String) -> Result<Output> {
    s.store
        .invoke(|inv| s.projects.set_contractor(inv, &id, &contractor))?;
    Ok(Output::Unit)
}

/// Handle AddMilestone command.
pub fn add_milestone(s: &Services, id: String, label: String, amount: String) -> Result<Output> {
    s.store
        .invoke(|inv| s.projects.add_milestone(inv, &id, &label, &amount))?;
    Ok(Output::Unit)
}

/// Handle ReleaseMilestone command.
pub fn release_milestone(s: &Services, id: String, label: String) -> Result<Output> {
    s.store
        .invoke(|inv| s.projects.release_milestone(inv, &id, &label))?;
    Ok(Output::Unit)
}
