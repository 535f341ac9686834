//! Schema version of the on-disk configuration.
//!
//! The version lives in the store itself at [`VERSION_SECTION`].[`VERSION_OPTION`]
//! as an integer-as-string. A store without it is at
//! [`SchemaVersion::INITIAL`].

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Section holding the schema version
pub const VERSION_SECTION: &str = "General";

/// Option holding the schema version
pub const VERSION_OPTION: &str = "version";

/// Latest version reachable through the bundled migrations
pub const CURRENT_SCHEMA_VERSION: SchemaVersion = SchemaVersion(1);

/// An integer schema version.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SchemaVersion(u32);

impl SchemaVersion {
    /// Version of a store that never recorded one
    pub const INITIAL: SchemaVersion = SchemaVersion(0);

    pub const fn new(version: u32) -> Self {
        Self(version)
    }
}

impl FromStr for SchemaVersion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(SchemaVersion)
            .map_err(|_| DomainError::InvalidVersion(s.to_string()))
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
