//! Command enum defining every ledger entry point.
//!
//! Commands are:
//! - **Self-contained**: all arguments travel in the variant
//! - **Serializable**: JSON in, JSON out, for hosts in any language
//! - **Text-typed**: numeric and structured arguments arrive as text and are
//!   parsed by the ledger, so malformed input is an `InvalidArgument`

use serde::{Deserialize, Serialize};

use landledger_core::{LedgerError, Result};

/// A self-contained, serializable ledger operation.
///
/// # Command Categories
///
/// | Category | Count | Description |
/// |----------|-------|-------------|
/// | Parcel | 12 | Parcel registry operations |
/// | Project | 14 | Project ledger operations |
///
/// # Example
///
/// ```
/// use landledger_executor::Command;
///
/// let cmd = Command::Fund { id: "J1".into(), amount: "300".into() };
/// let json = serde_json::to_string(&cmd).unwrap();
/// assert_eq!(json, r#"{"Fund":{"id":"J1","amount":"300"}}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    // ==================== Parcel (12) ====================
    /// Register a parcel from its JSON record.
    /// Returns: `Output::Parcel`
    RegisterParcel { parcel: String },

    /// Returns: `Output::Parcel`
    GetParcel { id: String },

    /// Returns: `Output::Bool`
    ParcelExists { id: String },

    /// Every registered parcel.
    /// Returns: `Output::Parcels`
    ListParcels,

    /// Returns: `Output::Parcels`
    QueryByOwner { owner: String },

    /// Returns: `Output::Parcels`
    QueryByTitle { title: String },

    /// Returns: `Output::Unit`
    TransferOwner { id: String, new_owner: String },

    /// Returns: `Output::Unit`
    UpdateDescription { id: String, description: String },

    /// Replace boundary (JSON array of `{lat, lng}`) and area (decimal text).
    /// Returns: `Output::Unit`
    UpdateGeometry {
        id: String,
        coordinates: String,
        area: String,
    },

    /// Returns: `Output::Unit`
    VerifyParcel { id: String, verified: bool },

    /// Returns: `Output::Unit`
    DeleteParcel { id: String },

    /// Returns: `Output::ParcelHistory`
    ParcelHistory { id: String },

    // ==================== Project (14) ====================
    /// Create a project from its JSON record.
    /// Returns: `Output::Project`
    CreateProject { project: String },

    /// Returns: `Output::Project`
    GetProject { id: String },

    /// Returns: `Output::Bool`
    ProjectExists { id: String },

    /// Returns: `Output::Projects`
    ListProjects,

    /// Returns: `Output::Projects`
    ListProjectsByParcel { parcel_id: String },

    /// Returns: `Output::Projects`
    ListProjectsByOwner { owner: String },

    /// Returns: `Output::Unit`
    Vote { id: String, voter: String },

    /// Returns: `Output::Unit`
    Fund { id: String, amount: String },

    /// Returns: `Output::Unit`
    UpdateStatus { id: String, status: String },

    /// Returns: `Output::Unit`
    SetContractor { id: String, contractor: String },

    /// Returns: `Output::Unit`
    AddMilestone {
        id: String,
        label: String,
        amount: String,
    },

    /// Returns: `Output::Unit`
    ReleaseMilestone { id: String, label: String },

    /// Returns: `Output::Unit`
    DeleteProject { id: String },

    /// Returns: `Output::ProjectHistory`
    ProjectHistory { id: String },
}

impl Command {
    /// Entry-point name this command is invoked under
    pub fn name(&self) -> &'static str {
        match self {
            Command::RegisterParcel { .. } => "RegisterParcel",
            Command::GetParcel { .. } => "GetParcel",
            Command::ParcelExists { .. } => "ParcelExists",
            Command::ListParcels => "GetAllParcels",
            Command::QueryByOwner { .. } => "QueryByOwner",
            Command::QueryByTitle { .. } => "QueryByTitle",
            Command::TransferOwner { .. } => "TransferOwner",
            Command::UpdateDescription { .. } => "UpdateDescription",
            Command::UpdateGeometry { .. } => "UpdateGeometry",
            Command::VerifyParcel { .. } => "VerifyParcel",
            Command::DeleteParcel { .. } => "DeleteParcel",
            Command::ParcelHistory { .. } => "GetHistory",
            Command::CreateProject { .. } => "CreateProject",
            Command::GetProject { .. } => "GetProject",
            Command::ProjectExists { .. } => "ProjectExists",
            Command::ListProjects => "ListProjects",
            Command::ListProjectsByParcel { .. } => "ListProjectsByParcel",
            Command::ListProjectsByOwner { .. } => "ListProjectsByOwner",
            Command::Vote { .. } => "Vote",
            Command::Fund { .. } => "Fund",
            Command::UpdateStatus { .. } => "UpdateProjectStatus",
            Command::SetContractor { .. } => "SetContractor",
            Command::AddMilestone { .. } => "AddMilestone",
            Command::ReleaseMilestone { .. } => "ReleaseMilestone",
            Command::DeleteProject { .. } => "DeleteProject",
            Command::ProjectHistory { .. } => "GetProjectHistory",
        }
    }

    /// True for commands that never write
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            Command::GetParcel { .. }
                | Command::ParcelExists { .. }
                | Command::ListParcels
                | Command::QueryByOwner { .. }
                | Command::QueryByTitle { .. }
                | Command::ParcelHistory { .. }
                | Command::GetProject { .. }
                | Command::ProjectExists { .. }
                | Command::ListProjects
                | Command::ListProjectsByParcel { .. }
                | Command::ListProjectsByOwner { .. }
                | Command::ProjectHistory { .. }
        )
    }

    /// Build a command from an entry-point name and positional text arguments
    ///
    /// ```
    /// use landledger_executor::Command;
    ///
    /// let cmd = Command::from_invocation("TransferOwner", &["P1".into(), "bob".into()]).unwrap();
    /// assert_eq!(cmd, Command::TransferOwner { id: "P1".into(), new_owner: "bob".into() });
    /// assert!(Command::from_invocation("TransferOwner", &["P1".into()]).is_err());
    /// ```
    pub fn from_invocation(name: &str, args: &[String]) -> Result<Command> {
        let cmd = match name {
            "RegisterParcel" => {
                let [parcel] = take::<1>(name, args)?;
                Command::RegisterParcel { parcel }
            }
            "GetParcel" => {
                let [id] = take::<1>(name, args)?;
                Command::GetParcel { id }
            }
            "Exists" | "ParcelExists" => {
                let [id] = take::<1>(name, args)?;
                Command::ParcelExists { id }
            }
            "GetAllParcels" | "ListParcels" => {
                take::<0>(name, args)?;
                Command::ListParcels
            }
            "QueryByOwner" => {
                let [owner] = take::<1>(name, args)?;
                Command::QueryByOwner { owner }
            }
            "QueryByTitle" => {
                let [title] = take::<1>(name, args)?;
                Command::QueryByTitle { title }
            }
            "TransferOwner" => {
                let [id, new_owner] = take::<2>(name, args)?;
                Command::TransferOwner { id, new_owner }
            }
            "UpdateDescription" => {
                let [id, description] = take::<2>(name, args)?;
                Command::UpdateDescription { id, description }
            }
            "UpdateGeometry" => {
                let [id, coordinates, area] = take::<3>(name, args)?;
                Command::UpdateGeometry {
                    id,
                    coordinates,
                    area,
                }
            }
            "VerifyParcel" => {
                let [id, verified] = take::<2>(name, args)?;
                Command::VerifyParcel {
                    id,
                    verified: parse_bool("verified", &verified)?,
                }
            }
            "DeleteParcel" => {
                let [id] = take::<1>(name, args)?;
                Command::DeleteParcel { id }
            }
            "GetHistory" | "ParcelHistory" => {
                let [id] = take::<1>(name, args)?;
                Command::ParcelHistory { id }
            }
            "CreateProject" => {
                let [project] = take::<1>(name, args)?;
                Command::CreateProject { project }
            }
            "GetProject" => {
                let [id] = take::<1>(name, args)?;
                Command::GetProject { id }
            }
            "ProjectExists" => {
                let [id] = take::<1>(name, args)?;
                Command::ProjectExists { id }
            }
            "ListProjects" => {
                take::<0>(name, args)?;
                Command::ListProjects
            }
            "ListProjectsByParcel" => {
                let [parcel_id] = take::<1>(name, args)?;
                Command::ListProjectsByParcel { parcel_id }
            }
            "ListProjectsByOwner" => {
                let [owner] = take::<1>(name, args)?;
                Command::ListProjectsByOwner { owner }
            }
            "Vote" => {
                let [id, voter] = take::<2>(name, args)?;
                Command::Vote { id, voter }
            }
            "Fund" => {
                let [id, amount] = take::<2>(name, args)?;
                Command::Fund { id, amount }
            }
            "UpdateProjectStatus" | "UpdateStatus" => {
                let [id, status] = take::<2>(name, args)?;
                Command::UpdateStatus { id, status }
            }
            "SetContractor" => {
                let [id, contractor] = take::<2>(name, args)?;
                Command::SetContractor { id, contractor }
            }
            "AddMilestone" => {
                let [id, label, amount] = take::<3>(name, args)?;
                Command::AddMilestone { id, label, amount }
            }
            "ReleaseMilestone" => {
                let [id, label] = take::<2>(name, args)?;
                Command::ReleaseMilestone { id, label }
            }
            "DeleteProject" => {
                let [id] = take::<1>(name, args)?;
                Command::DeleteProject { id }
            }
            "GetProjectHistory" | "ProjectHistory" => {
                let [id] = take::<1>(name, args)?;
                Command::ProjectHistory { id }
            }
            other => {
                return Err(LedgerError::invalid_argument(format!(
                    "unknown entry point '{}'",
                    other
                )))
            }
        };
        Ok(cmd)
    }
}

/// Exactly `N` positional arguments
fn take<const N: usize>(name: &str, args: &[String]) -> Result<[String; N]> {
    <[String; N]>::try_from(args.to_vec()).map_err(|got| {
        LedgerError::invalid_argument(format!(
            "{} takes {} argument(s), got {}",
            name,
            N,
            got.len()
        ))
    })
}

fn parse_bool(field: &str, text: &str) -> Result<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(LedgerError::invalid_argument(format!(
            "invalid {} (must be true or false): '{}'",
            field, text
        ))),
    }
}
