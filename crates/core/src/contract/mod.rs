//! Contract types shared by the store and the ledger
//!
//! - `version`: commit version identifiers
//! - `history`: raw per-key history records and decoded history entries
//!
//! ## Ordering
//!
//! History is always reported **oldest-first** (ascending version). Stores
//! that keep versions newest-first must reverse before handing them out.

pub mod history;
pub mod version;

pub use history::{HistoryEntry, HistoryRecord};
pub use version::Version;
