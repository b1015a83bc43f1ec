//! Parcel command handlers.
//!
//! Each handler runs one store invocation against [`ParcelRegistry`](landledger_registry::ParcelRegistry).

use landledger_core::Parcel;
use landledger_registry::codec::from_payload;

use crate::bridge::Services;
use crate::{Output, Result};

// =============================================================================
// Individual Handlers
// =============================================================================

/// Handle RegisterParcel command.
pub fn register(s: &Services, parcel_json: String) -> Result<Output> {
    let parcel: Parcel = from_payload("parcel", &parcel_json)?;
    let parcel = s.store.invoke(|inv| s.parcels.register(inv, parcel))?;
    Ok(Output::Parcel(parcel))
}

/// Handle GetParcel command.
pub fn get(s: &Services, id: String) -> Result<Output> {
    let parcel = s.store.invoke(|inv| s.parcels.get(inv, &id))?;
    Ok(Output::Parcel(parcel))
}

/// Handle ParcelExists command.
pub fn exists(s: &Services, id: String) -> Result<Output> {
    let found = s.store.invoke(|inv| s.parcels.exists(inv, &id))?;
    Ok(Output::Bool(found))
}

/// Handle ListParcels command.
pub fn list(s: &Services) -> Result<Output> {
    let parcels = s.store.invoke(|inv| s.parcels.list(inv))?;
    Ok(Output::Parcels(parcels))
}

/// Handle QueryByOwner command.
pub fn query_by_owner(s: &Services, owner: String) -> Result<Output> {
    let parcels = s.store.invoke(|inv| s.parcels.query_by_owner(inv, &owner))?;
    Ok(Output::Parcels(parcels))
}

/// Handle QueryByTitle command.
pub fn query_by_title(s: &Services, title: String) -> Result<Output> {
    let parcels = s.store.invoke(|inv| s.parcels.query_by_title(inv, &title))?;
    Ok(Output::Parcels(parcels))
}

/// Handle TransferOwner command.
pub fn transfer_owner(s: &Services, id: String, new_owner: String) -> Result<Output> {
    s.store
        .invoke(|inv| s.parcels.transfer_owner(inv, &id, &new_owner))?;
    Ok(Output::Unit)
}

/// Handle UpdateDescription command.
pub fn update_description(s: &Services, id: String, description: String) -> Result<Output> {
    s.store
        .invoke(|inv| s.parcels.update_description(inv, &id, &description))?;
    Ok(Output::Unit)
}

/// Handle UpdateGeometry command.
pub fn update_geometry(
    s: &Services,
    id: String,
    coordinates: String,
    area: String,
) -> Result<Output> {
    s.store
        .invoke(|inv| s.parcels.update_geometry(inv, &id, &coordinates, &area))?;
    Ok(Output::Unit)
}

/// Handle VerifyParcel command.
pub fn verify(s: &Services, id: String, verified: bool) -> Result<Output> {
    s.store.invoke(|inv| s.parcels.verify(inv, &id, verified))?;
    Ok(Output::Unit)
}

/// Handle DeleteParcel command.
pub fn delete(s: &Services, id: String) -> Result<Output> {
    s.store.invoke(|inv| s.parcels.delete(inv, &id))?;
    Ok(Output::Unit)
}

/// Handle ParcelHistory command.
pub fn history(s: &Services, id: String) -> Result<Output> {
    let entries = s.store.invoke(|inv| s.parcels.history(inv, &id))?;
    Ok(Output::ParcelHistory(entries))
}
