//! Command handlers organized by service.
//!
//! | Module | Commands | Service |
//! |--------|----------|---------|
//! | `parcel` | 12 | ParcelRegistry |
//! | `project` | 14 | ProjectLedger |

pub mod parcel;
pub mod project;
