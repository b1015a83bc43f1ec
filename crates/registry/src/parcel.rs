//! Parcel registry
//!
//! Lifecycle: `register` creates, `transfer_owner` / `update_description` /
//! `update_geometry` / `verify` mutate, `delete` destroys. Every operation
//! re-reads the current record inside the caller's invocation before acting.
//!
//! ## Key Design
//!
//! - Primary record: `TypeTag::Parcel` + parcel id
//! - Indexes: `ParcelOwner` (owner) and `ParcelTitle` (title number)

use chrono::Utc;
use tracing::{debug, info, warn};

use landledger_core::validation::{
    parse_area, parse_coordinates, require_non_empty, validate_area, validate_coordinates,
    validate_id,
};
use landledger_core::{
    HistoryEntry, IndexNamespace, Key, LedgerError, Parcel, RecordStore, Result, TypeTag,
};

use crate::codec::{from_stored, to_stored};
use crate::history::replay;
use crate::index::IndexManager;

/// Registry of land parcels
#[derive(Debug, Clone, Default)]
pub struct ParcelRegistry {
    indexes: IndexManager,
}

impl ParcelRegistry {
    /// Create a registry
    pub fn new() -> Self {
        Self {
            indexes: IndexManager::new(),
        }
    }

    fn key_for(id: &str) -> Key {
        Key::parcel(id)
    }

    fn load<S: RecordStore + ?Sized>(store: &mut S, id: &str) -> Result<Parcel> {
        let key = Self::key_for(id);
        match store.get(&key)? {
            Some(bytes) => from_stored(&key, &bytes),
            None => Err(LedgerError::not_found(format!("parcel {} not found", id))),
        }
    }

    fn save<S: RecordStore + ?Sized>(store: &mut S, parcel: &Parcel) -> Result<()> {
        store.put(Self::key_for(&parcel.id), to_stored(parcel)?)?;
        Ok(())
    }

    // ========== Create ==========

    /// Register a new parcel
    ///
    /// The title number defaults to the id and the registration time to now.
    pub fn register<S: RecordStore + ?Sized>(&self, store: &mut S, mut parcel: Parcel) -> Result<Parcel> {
        validate_id("parcelId", &parcel.id)?;
        require_non_empty("owner", &parcel.owner)?;
        validate_coordinates(&parcel.coordinates)?;
        validate_area(parcel.area_sq_km)?;

        if store.exists(&Self::key_for(&parcel.id))? {
            return Err(LedgerError::already_exists(format!(
                "parcel {} already exists",
                parcel.id
            )));
        }

        if parcel.title_number.is_empty() {
            parcel.title_number = parcel.id.clone();
        }
        if parcel.created_at.is_none() {
            parcel.created_at = Some(Utc::now());
        }

        Self::save(store, &parcel)?;
        self.indexes.add_indexes(store, &parcel)?;
        info!(target: "landledger::parcel", id = %parcel.id, owner = %parcel.owner, "parcel registered");
        Ok(parcel)
    }

    // ========== Read ==========

    /// Current record of `id`
    pub fn get<S: RecordStore + ?Sized>(&self, store: &mut S, id: &str) -> Result<Parcel> {
        Self::load(store, id)
    }

    /// True if `id` is registered
    pub fn exists<S: RecordStore + ?Sized>(&self, store: &mut S, id: &str) -> Result<bool> {
        Ok(store.exists(&Self::key_for(id))?)
    }

    /// Every registered parcel in id order, skipping records that fail to decode
    pub fn list<S: RecordStore + ?Sized>(&self, store: &mut S) -> Result<Vec<Parcel>> {
        let mut out = Vec::new();
        for entry in store.scan_prefix(&Key::prefix(TypeTag::Parcel))? {
            let (key, bytes) = entry?;
            match serde_json::from_slice::<Parcel>(&bytes) {
                Ok(parcel) if !parcel.id.is_empty() => out.push(parcel),
                Ok(_) => warn!(target: "landledger::parcel", %key, "skipping parcel without id"),
                Err(e) => warn!(target: "landledger::parcel", %key, error = %e, "skipping undecodable parcel"),
            }
        }
        Ok(out)
    }

    /// Parcels currently owned by `owner`
    pub fn query_by_owner<S: RecordStore + ?Sized>(&self, store: &mut S, owner: &str) -> Result<Vec<Parcel>> {
        self.query(store, IndexNamespace::ParcelOwner, owner)
    }

    /// Parcels carrying title number `title`
    pub fn query_by_title<S: RecordStore + ?Sized>(&self, store: &mut S, title: &str) -> Result<Vec<Parcel>> {
        self.query(store, IndexNamespace::ParcelTitle, title)
    }

    fn query<S: RecordStore + ?Sized>(
        &self,
        store: &mut S,
        namespace: IndexNamespace,
        value: &str,
    ) -> Result<Vec<Parcel>> {
        let ids = self.indexes.lookup(store, namespace, value)?;
        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            match Self::load(store, &id) {
                Ok(parcel) => out.push(parcel),
                Err(LedgerError::NotFound(_)) => {
                    warn!(target: "landledger::parcel", %namespace, value, %id, "index entry points at missing parcel");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(out)
    }

    // ========== Update ==========

    /// Hand `id` to `new_owner`, moving its owner index entry
    pub fn transfer_owner<S: RecordStore + ?Sized>(&self, store: &mut S, id: &str, new_owner: &str) -> Result<()> {
        require_non_empty("new owner", new_owner)?;
        let old = Self::load(store, id)?;

        let mut parcel = old.clone();
        parcel.owner = new_owner.to_string();

        self.indexes.reindex(store, &old, &parcel)?;
        Self::save(store, &parcel)?;
        info!(target: "landledger::parcel", id, from = %old.owner, to = new_owner, "ownership transferred");
        Ok(())
    }

    /// Replace the free-text description
    pub fn update_description<S: RecordStore + ?Sized>(&self, store: &mut S, id: &str, description: &str) -> Result<()> {
        let mut parcel = Self::load(store, id)?;
        parcel.description = description.to_string();
        Self::save(store, &parcel)?;
        debug!(target: "landledger::parcel", id, "description updated");
        Ok(())
    }

    /// Replace the boundary and area from their text forms
    pub fn update_geometry<S: RecordStore + ?Sized>(
        &self,
        store: &mut S,
        id: &str,
        coordinates_json: &str,
        area: &str,
    ) -> Result<()> {
        let mut parcel = Self::load(store, id)?;
        parcel.coordinates = parse_coordinates(coordinates_json)?;
        parcel.area_sq_km = parse_area(area)?;
        Self::save(store, &parcel)?;
        info!(
            target: "landledger::parcel",
            id,
            points = parcel.coordinates.len(),
            area = parcel.area_sq_km,
            "geometry updated"
        );
        Ok(())
    }

    /// Set the verification flag
    pub fn verify<S: RecordStore + ?Sized>(&self, store: &mut S, id: &str, verified: bool) -> Result<()> {
        let mut parcel = Self::load(store, id)?;
        parcel.verified = verified;
        Self::save(store, &parcel)?;
        info!(target: "landledger::parcel", id, verified, "verification set");
        Ok(())
    }

    // ========== Delete ==========

    /// Delete `id` and its index entries
    pub fn delete<S: RecordStore + ?Sized>(&self, store: &mut S, id: &str) -> Result<()> {
        let parcel = Self::load(store, id)?;
        store.delete(&Self::key_for(id))?;
        self.indexes.remove_indexes(store, &parcel)?;
        info!(target: "landledger::parcel", id, "parcel deleted");
        Ok(())
    }

    // ========== History ==========

    /// Every committed version of `id`, oldest first
    pub fn history<S: RecordStore + ?Sized>(&self, store: &mut S, id: &str) -> Result<Vec<HistoryEntry<Parcel>>> {
        replay(store, &Self::key_for(id))
    }
}
