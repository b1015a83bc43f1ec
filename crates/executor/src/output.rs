//! Output enum for command execution results.
//!
//! Every command produces exactly one output variant. The mapping is fixed by
//! the command; only the values depend on ledger state.

use serde::{Deserialize, Serialize};

use landledger_core::{HistoryEntry, LedgerError, Parcel, Project, Result};

/// Successful command execution results.
///
/// Each [`Command`](crate::Command) variant maps to exactly one `Output` variant.
///
/// # Example
///
/// ```text
/// use landledger_executor::{Command, Output, Executor};
///
/// match executor.execute(Command::ParcelExists { id: "P1".into() })? {
///     Output::Bool(found) => println!("registered: {}", found),
///     _ => unreachable!("ParcelExists always returns Bool"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    // ==================== Primitive Results ====================
    /// No return value (mutations)
    Unit,

    /// Existence checks
    Bool(bool),

    // ==================== Records ====================
    /// One parcel
    Parcel(Parcel),

    /// Parcel listings and queries
    Parcels(Vec<Parcel>),

    /// One project
    Project(Project),

    /// Project listings
    Projects(Vec<Project>),

    // ==================== History ====================
    /// Parcel versions, oldest first
    ParcelHistory(Vec<HistoryEntry<Parcel>>),

    /// Project versions, oldest first
    ProjectHistory(Vec<HistoryEntry<Project>>),
}

impl Output {
    /// Render the payload the way an entry point returns it
    ///
    /// Records and lists are their JSON form without the variant wrapper.
    /// `Unit` renders as an empty string.
    pub fn to_json(&self) -> Result<String> {
        let rendered = match self {
            Output::Unit => return Ok(String::new()),
            Output::Bool(b) => serde_json::to_string(b),
            Output::Parcel(p) => serde_json::to_string(p),
            Output::Parcels(ps) => serde_json::to_string(ps),
            Output::Project(p) => serde_json::to_string(p),
            Output::Projects(ps) => serde_json::to_string(ps),
            Output::ParcelHistory(h) => serde_json::to_string(h),
            Output::ProjectHistory(h) => serde_json::to_string(h),
        };
        rendered.map_err(|e| LedgerError::store_io(format!("failed to encode output: {}", e)))
    }

    /// Variant name, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Output::Unit => "Unit",
            Output::Bool(_) => "Bool",
            Output::Parcel(_) => "Parcel",
            Output::Parcels(_) => "Parcels",
            Output::Project(_) => "Project",
            Output::Projects(_) => "Projects",
            Output::ParcelHistory(_) => "ParcelHistory",
            Output::ProjectHistory(_) => "ProjectHistory",
        }
    }
}
