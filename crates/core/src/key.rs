//! Storage keys
//!
//! Every record lives under a [`Key`] made of a [`TypeTag`] and raw key bytes.
//! Keys order by tag first, then bytewise, so a prefix scan over one tag never
//! crosses into another.
//!
//! ## Layout
//!
//! - Parcel record:  `TypeTag::Parcel` + bare parcel id
//! - Project record: `TypeTag::Project` + bare project id
//! - Index marker:   `TypeTag::Index` + encoded [`CompositeKey`](crate::composite::CompositeKey)

use std::fmt;

use serde::{Deserialize, Serialize};

/// Discriminates the record families sharing one keyspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum TypeTag {
    /// Land parcel primary records
    Parcel = 0x01,
    /// Project primary records
    Project = 0x02,
    /// Valueless secondary index markers
    Index = 0x10,
}

impl TypeTag {
    /// Short name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Parcel => "parcel",
            TypeTag::Project => "project",
            TypeTag::Index => "index",
        }
    }
}

/// A key in the record store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Key {
    /// Record family
    pub type_tag: TypeTag,
    /// Key bytes within the family
    pub user_key: Vec<u8>,
}

impl Key {
    /// Create a key from a tag and raw bytes
    pub fn new(type_tag: TypeTag, user_key: impl Into<Vec<u8>>) -> Self {
        Key {
            type_tag,
            user_key: user_key.into(),
        }
    }

    /// Primary key of a parcel
    pub fn parcel(id: &str) -> Self {
        Key::new(TypeTag::Parcel, id.as_bytes())
    }

    /// Primary key of a project
    pub fn project(id: &str) -> Self {
        Key::new(TypeTag::Project, id.as_bytes())
    }

    /// Key of an index marker from already-encoded composite bytes
    pub fn index(encoded: Vec<u8>) -> Self {
        Key::new(TypeTag::Index, encoded)
    }

    /// Prefix matching every key of a tag
    pub fn prefix(type_tag: TypeTag) -> Self {
        Key::new(type_tag, Vec::new())
    }

    /// True if `self` has the same tag as `prefix` and its bytes start with the prefix bytes
    pub fn starts_with(&self, prefix: &Key) -> bool {
        self.type_tag == prefix.type_tag && self.user_key.starts_with(&prefix.user_key)
    }

    /// Key bytes as UTF-8, if they are
    pub fn user_key_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.user_key).ok()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.type_tag, self.user_key_str()) {
            (TypeTag::Index, _) | (_, None) => {
                write!(f, "{}:", self.type_tag.as_str())?;
                for b in &self.user_key {
                    write!(f, "{:02x}", b)?;
                }
                Ok(())
            }
            (tag, Some(s)) => write!(f, "{}:{}", tag.as_str(), s),
        }
    }
}
