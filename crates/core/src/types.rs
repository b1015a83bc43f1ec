//! Domain records: parcels, projects and milestones
//!
//! Records serialize to field-named JSON using the ledger's wire names
//! (`parcelId`, `titleNumber`, `areaSqKm`, `projectId`, ...). Missing optional
//! fields take their defaults on decode.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::composite::IndexNamespace;
use crate::error::{LedgerError, Result};

/// A lat/lng pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

/// A registered land parcel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parcel {
    /// Primary key
    #[serde(rename = "parcelId", default)]
    pub id: String,
    /// Title number, defaults to the id at registration
    #[serde(default)]
    pub title_number: String,
    /// Current owner
    #[serde(default)]
    pub owner: String,
    /// Boundary polygon
    #[serde(default)]
    pub coordinates: Vec<Coordinate>,
    /// Area in square kilometres
    #[serde(default)]
    pub area_sq_km: f64,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Verification flag
    #[serde(default)]
    pub verified: bool,
    /// Registration time, set once
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Parcel {
    /// A parcel with only its required fields set
    pub fn new(id: impl Into<String>, owner: impl Into<String>) -> Self {
        Parcel {
            id: id.into(),
            title_number: String::new(),
            owner: owner.into(),
            coordinates: Vec::new(),
            area_sq_km: 0.0,
            description: String::new(),
            verified: false,
            created_at: None,
        }
    }

    /// Builder-style title number
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title_number = title.into();
        self
    }
}

/// A funding gate within a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Label, looked up by release
    pub label: String,
    /// Amount disbursed on release
    pub amount: u64,
    /// Set once on release, never cleared
    #[serde(default)]
    pub released: bool,
}

/// Project lifecycle status
///
/// ```text
/// Created -> Active -> Funded -> Completed
///    \         |         /
///     +--> Cancelled <--+
/// ```
///
/// Decoding goes through [`FromStr`], so record payloads and status updates
/// accept the same spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Newly created
    #[default]
    Created,
    /// Open for votes and funding
    Active,
    /// Funding goal reached
    Funded,
    /// Work delivered (terminal)
    Completed,
    /// Abandoned (terminal)
    Cancelled,
}

impl ProjectStatus {
    /// Lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Created => "created",
            ProjectStatus::Active => "active",
            ProjectStatus::Funded => "funded",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Cancelled => "cancelled",
        }
    }

    /// True for statuses with no way out
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProjectStatus::Completed | ProjectStatus::Cancelled)
    }

    /// Whether moving from `self` to `next` is legal
    ///
    /// Staying in the same status is always legal.
    pub fn can_transition_to(&self, next: ProjectStatus) -> bool {
        use ProjectStatus::*;
        if *self == next {
            return true;
        }
        matches!(
            (self, next),
            (Created, Active)
                | (Active, Funded)
                | (Funded, Completed)
                | (Created, Cancelled)
                | (Active, Cancelled)
                | (Funded, Cancelled)
        )
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "created" => Ok(ProjectStatus::Created),
            "active" => Ok(ProjectStatus::Active),
            "funded" => Ok(ProjectStatus::Funded),
            "completed" => Ok(ProjectStatus::Completed),
            "cancelled" => Ok(ProjectStatus::Cancelled),
            "" => Err(LedgerError::invalid_argument("status is required")),
            other => Err(LedgerError::invalid_argument(format!(
                "unknown project status '{}'",
                other
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for ProjectStatus {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse()
            .map_err(|e: LedgerError| serde::de::Error::custom(e.message()))
    }
}

/// A crowdfunding project anchored to a parcel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Primary key
    #[serde(rename = "projectId", default)]
    pub id: String,
    /// Parcel the project is anchored to
    #[serde(default)]
    pub parcel_id: String,
    /// Project owner
    #[serde(default)]
    pub owner: String,
    /// Kind of development work
    #[serde(rename = "type", default)]
    pub project_type: String,
    /// Funding goal
    #[serde(default)]
    pub goal: u64,
    /// Votes needed for approval (recorded, not enforced)
    #[serde(default)]
    pub required_votes: u32,
    /// Contribution expected per vote
    #[serde(default)]
    pub amount_per_vote: u64,
    /// Current balance; raised by funding, lowered by milestone release
    #[serde(default)]
    pub funded: u64,
    /// Lifecycle status
    #[serde(default)]
    pub status: ProjectStatus,
    /// Distinct voter ids
    #[serde(default)]
    pub voters: BTreeSet<String>,
    /// Disbursement schedule, in insertion order
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    /// Assigned contractor
    #[serde(default)]
    pub contractor: String,
    /// Title number of the anchoring parcel, informational
    #[serde(default)]
    pub title_number: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last mutation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Project {
    /// A project with only its required fields set
    pub fn new(id: impl Into<String>, parcel_id: impl Into<String>, owner: impl Into<String>) -> Self {
        Project {
            id: id.into(),
            parcel_id: parcel_id.into(),
            owner: owner.into(),
            project_type: String::new(),
            goal: 0,
            required_votes: 0,
            amount_per_vote: 0,
            funded: 0,
            status: ProjectStatus::Created,
            voters: BTreeSet::new(),
            milestones: Vec::new(),
            contractor: String::new(),
            title_number: String::new(),
            description: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Builder-style funding goal
    pub fn with_goal(mut self, goal: u64) -> Self {
        self.goal = goal;
        self
    }

    /// Record a voter; returns false if they had already voted
    pub fn add_voter(&mut self, voter: &str) -> bool {
        self.voters.insert(voter.to_string())
    }

    /// Raise the funded balance
    pub fn fund(&mut self, amount: u64) -> Result<()> {
        self.funded = self.funded.checked_add(amount).ok_or_else(|| {
            LedgerError::invalid_argument(format!(
                "funding {} would overflow balance {} of project {}",
                amount, self.funded, self.id
            ))
        })?;
        Ok(())
    }

    /// First milestone carrying `label`
    pub fn milestone(&self, label: &str) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.label == label)
    }

    /// Release the first milestone labelled `label`
    ///
    /// Returns `Ok(false)` if it was already released (nothing changes),
    /// `Ok(true)` if it was released now and its amount left the balance.
    pub fn release_milestone(&mut self, label: &str) -> Result<bool> {
        let funded = self.funded;
        let id = &self.id;
        let milestone = self
            .milestones
            .iter_mut()
            .find(|m| m.label == label)
            .ok_or_else(|| {
                LedgerError::not_found(format!("milestone '{}' in project {}", label, id))
            })?;
        if milestone.released {
            return Ok(false);
        }
        if funded < milestone.amount {
            return Err(LedgerError::insufficient_funds(format!(
                "milestone '{}' needs {}, project {} has {}",
                label, milestone.amount, id, funded
            )));
        }
        milestone.released = true;
        self.funded = funded - milestone.amount;
        Ok(true)
    }
}

/// An entity with secondary indexes
pub trait Indexed {
    /// Primary id written into each index marker
    fn entity_id(&self) -> &str;

    /// `(namespace, value)` for every indexed field, empty values included
    fn index_fields(&self) -> Vec<(IndexNamespace, &str)>;
}

impl Indexed for Parcel {
    fn entity_id(&self) -> &str {
        &self.id
    }

    fn index_fields(&self) -> Vec<(IndexNamespace, &str)> {
        vec![
            (IndexNamespace::ParcelOwner, self.owner.as_str()),
            (IndexNamespace::ParcelTitle, self.title_number.as_str()),
        ]
    }
}

impl Indexed for Project {
    fn entity_id(&self) -> &str {
        &self.id
    }

    fn index_fields(&self) -> Vec<(IndexNamespace, &str)> {
        vec![
            (IndexNamespace::ProjectParcel, self.parcel_id.as_str()),
            (IndexNamespace::ProjectOwner, self.owner.as_str()),
        ]
    }
}
