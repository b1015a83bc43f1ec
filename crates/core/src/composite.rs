//! Composite index keys
//!
//! A composite key maps `(namespace, field value, entity id)` to a valueless
//! marker under [`TypeTag::Index`](crate::key::TypeTag::Index).
//!
//! ## Encoding
//!
//! Each component is written byte-stuffed and terminated:
//!
//! ```text
//! 0x00        -> 0x00 0xFF   (escaped NUL inside a component)
//! end of part -> 0x00 0x01   (terminator)
//! ```
//!
//! Field values are free text, so nothing is forbidden in them; the escape makes
//! every encoding split back into exactly its three parts. Encoding is
//! order-preserving per component, and the terminator keeps the prefix for value
//! `"a"` from matching entries for `"ab"` or `"a\0b"`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::key::Key;

const ESCAPE: u8 = 0x00;
const ESCAPED_NUL: u8 = 0xFF;
const TERMINATOR: u8 = 0x01;

/// Index namespaces, one per indexed field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IndexNamespace {
    /// Parcel owner -> parcel id
    ParcelOwner,
    /// Parcel title number -> parcel id
    ParcelTitle,
    /// Project parcel id -> project id
    ProjectParcel,
    /// Project owner -> project id
    ProjectOwner,
}

impl IndexNamespace {
    /// All namespaces
    pub const ALL: [IndexNamespace; 4] = [
        IndexNamespace::ParcelOwner,
        IndexNamespace::ParcelTitle,
        IndexNamespace::ProjectParcel,
        IndexNamespace::ProjectOwner,
    ];

    /// Namespace name as written into the key
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexNamespace::ParcelOwner => "owner~parcel",
            IndexNamespace::ParcelTitle => "title~parcel",
            IndexNamespace::ProjectParcel => "project~parcel~id",
            IndexNamespace::ProjectOwner => "project~owner~id",
        }
    }
}

impl fmt::Display for IndexNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexNamespace {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IndexNamespace::ALL
            .into_iter()
            .find(|ns| ns.as_str() == s)
            .ok_or_else(|| KeyError::UnknownNamespace(s.to_string()))
    }
}

/// Composite key decoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// Escape byte followed by something other than an escape or terminator
    #[error("malformed escape at byte {offset}")]
    MalformedEscape {
        /// Offset of the escape byte
        offset: usize,
    },

    /// Trailing bytes without a terminator
    #[error("unterminated component")]
    Unterminated,

    /// Wrong number of components
    #[error("expected 3 components, found {found}")]
    Arity {
        /// Components actually decoded
        found: usize,
    },

    /// Namespace component names no known index
    #[error("unknown index namespace '{0}'")]
    UnknownNamespace(String),

    /// A component is not valid UTF-8
    #[error("component is not valid UTF-8")]
    NotUtf8,
}

/// A decoded `(namespace, value, entity id)` triple
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeKey {
    /// Index the entry belongs to
    pub namespace: IndexNamespace,
    /// Indexed field value
    pub value: String,
    /// Id of the entity carrying that value
    pub entity_id: String,
}

impl CompositeKey {
    /// Create a composite key
    pub fn new(namespace: IndexNamespace, value: impl Into<String>, entity_id: impl Into<String>) -> Self {
        CompositeKey {
            namespace,
            value: value.into(),
            entity_id: entity_id.into(),
        }
    }

    /// Encode to bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            self.namespace.as_str().len() + self.value.len() + self.entity_id.len() + 6,
        );
        push_component(&mut out, self.namespace.as_str().as_bytes());
        push_component(&mut out, self.value.as_bytes());
        push_component(&mut out, self.entity_id.as_bytes());
        out
    }

    /// Store key of this marker
    pub fn to_key(&self) -> Key {
        Key::index(self.encode())
    }

    /// Store key prefix matching every entry of `namespace` with field value `value`
    pub fn prefix(namespace: IndexNamespace, value: &str) -> Key {
        let mut out = Vec::with_capacity(namespace.as_str().len() + value.len() + 4);
        push_component(&mut out, namespace.as_str().as_bytes());
        push_component(&mut out, value.as_bytes());
        Key::index(out)
    }

    /// Decode from bytes produced by [`encode`](Self::encode)
    pub fn decode(bytes: &[u8]) -> Result<Self, KeyError> {
        let mut parts: Vec<Vec<u8>> = Vec::with_capacity(3);
        let mut current = Vec::new();
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            if b != ESCAPE {
                current.push(b);
                i += 1;
                continue;
            }
            match bytes.get(i + 1) {
                Some(&ESCAPED_NUL) => current.push(0x00),
                Some(&TERMINATOR) => parts.push(std::mem::take(&mut current)),
                _ => return Err(KeyError::MalformedEscape { offset: i }),
            }
            i += 2;
        }
        if !current.is_empty() {
            return Err(KeyError::Unterminated);
        }
        if parts.len() != 3 {
            return Err(KeyError::Arity { found: parts.len() });
        }

        let mut strings = parts
            .into_iter()
            .map(|p| String::from_utf8(p).map_err(|_| KeyError::NotUtf8));
        let namespace: IndexNamespace = next_part(&mut strings)?.parse()?;
        let value = next_part(&mut strings)?;
        let entity_id = next_part(&mut strings)?;
        Ok(CompositeKey {
            namespace,
            value,
            entity_id,
        })
    }

    /// Decode the user bytes of an index store key
    pub fn from_key(key: &Key) -> Result<Self, KeyError> {
        Self::decode(&key.user_key)
    }
}

fn next_part(
    parts: &mut impl Iterator<Item = Result<String, KeyError>>,
) -> Result<String, KeyError> {
    parts.next().unwrap_or(Err(KeyError::Arity { found: 0 }))
}

fn push_component(out: &mut Vec<u8>, component: &[u8]) {
    for &b in component {
        if b == ESCAPE {
            out.push(ESCAPE);
            out.push(ESCAPED_NUL);
        } else {
            out.push(b);
        }
    }
    out.push(ESCAPE);
    out.push(TERMINATOR);
}
