//! Error types for the land ledger
//!
//! Two layers of errors exist:
//! - [`StoreError`]: failures raised by a record store implementation
//! - [`LedgerError`]: the closed taxonomy every ledger operation returns
//!
//! Store failures always reach callers as [`LedgerError::StoreIO`]. The first
//! error aborts the operation; nothing is retried here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::key::Key;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Result type alias for record store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors raised by a record store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A key read by the invocation changed before it could commit
    #[error("write conflict on {key}")]
    Conflict {
        /// Key whose version moved underneath the invocation
        key: Key,
    },

    /// The store cannot serve the request
    #[error("store unavailable: {reason}")]
    Unavailable {
        /// Human-readable cause
        reason: String,
    },

    /// Stored data could not be interpreted
    #[error("corrupt record: {reason}")]
    Corrupt {
        /// Human-readable cause
        reason: String,
    },
}

/// Ledger operation errors
///
/// | Variant | Raised when |
/// |---------|-------------|
/// | `NotFound` | missing parcel, project or milestone label |
/// | `AlreadyExists` | duplicate id on register/create |
/// | `InvalidArgument` | malformed payload, bad number, empty required field |
/// | `InsufficientFunds` | milestone release exceeds the funded balance |
/// | `StoreIO` | failure surfaced from the record store |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "code", content = "message", rename_all = "snake_case")]
pub enum LedgerError {
    /// Entity or milestone does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Entity id is already taken
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Caller supplied an unusable argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Funded balance cannot cover the requested release
    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),

    /// Record store failure
    #[error("store error: {0}")]
    #[serde(rename = "store_io")]
    StoreIO(String),
}

impl LedgerError {
    /// Create a `NotFound` error
    pub fn not_found(msg: impl Into<String>) -> Self {
        LedgerError::NotFound(msg.into())
    }

    /// Create an `AlreadyExists` error
    pub fn already_exists(msg: impl Into<String>) -> Self {
        LedgerError::AlreadyExists(msg.into())
    }

    /// Create an `InvalidArgument` error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        LedgerError::InvalidArgument(msg.into())
    }

    /// Create an `InsufficientFunds` error
    pub fn insufficient_funds(msg: impl Into<String>) -> Self {
        LedgerError::InsufficientFunds(msg.into())
    }

    /// Create a `StoreIO` error
    pub fn store_io(msg: impl Into<String>) -> Self {
        LedgerError::StoreIO(msg.into())
    }

    /// Stable wire code for this error
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::NotFound(_) => "not_found",
            LedgerError::AlreadyExists(_) => "already_exists",
            LedgerError::InvalidArgument(_) => "invalid_argument",
            LedgerError::InsufficientFunds(_) => "insufficient_funds",
            LedgerError::StoreIO(_) => "store_io",
        }
    }

    /// The message carried by the error
    pub fn message(&self) -> &str {
        match self {
            LedgerError::NotFound(m)
            | LedgerError::AlreadyExists(m)
            | LedgerError::InvalidArgument(m)
            | LedgerError::InsufficientFunds(m)
            | LedgerError::StoreIO(m) => m,
        }
    }
}

impl From<StoreError> for LedgerError {
    fn from(e: StoreError) -> Self {
        LedgerError::StoreIO(e.to_string())
    }
}

/// Caller payloads that fail to parse are the caller's fault.
impl From<serde_json::Error> for LedgerError {
    fn from(e: serde_json::Error) -> Self {
        LedgerError::InvalidArgument(format!("malformed payload: {}", e))
    }
}
