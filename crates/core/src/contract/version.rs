//! Commit version identifiers
//!
//! Every committed invocation that writes allocates exactly one version. All
//! keys written by that invocation share it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A commit version
///
/// Versions are monotonically increasing across the whole store.
/// `Version::ZERO` means "never written".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    /// The version of a key that has never been written
    pub const ZERO: Version = Version(0);

    /// Wrap a raw version number
    pub const fn new(v: u64) -> Self {
        Version(v)
    }

    /// Raw version number
    #[inline]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// True for `Version::ZERO`
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for Version {
    fn from(v: u64) -> Self {
        Version(v)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}
