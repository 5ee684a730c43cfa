use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};

/// A listing of Minecraft versions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Every known version, indexed by version ID.
    pub versions: HashMap<String, Version>,
    /// IDs of the newest versions.
    pub latest: Latest,
}

impl Listing {
    /// The version information for the latest release, if listed.
    pub fn latest_release(&self) -> Option<&Version> {
        self.versions.get(&self.latest.release)
    }

    /// The version information for the latest development snapshot, if listed.
    pub fn latest_snapshot(&self) -> Option<&Version> {
        self.versions.get(&self.latest.snapshot)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Latest {
    /// Version ID of the latest release.
    pub release: String,
    /// Version ID of the latest development snapshot.
    pub snapshot: String,
}

/// A single Minecraft version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    /// Version identifier, e.g. "1.8.1".
    pub id: String,
    /// When the version was released.
    pub released: DateTime<Utc>,
    /// Release type.
    pub kind: VersionType,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// The release type of a version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionType {
    Release,
    Snapshot,
    Alpha,
    Beta,
    /// A type this crate does not know about yet, verbatim.
    Other(String),
}

impl VersionType {
    pub(crate) fn from_wire(s: &str) -> Self {
        match s {
            "release" => Self::Release,
            "snapshot" => Self::Snapshot,
            "old_alpha" => Self::Alpha,
            "old_beta" => Self::Beta,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for VersionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Release => "release",
            Self::Snapshot => "snapshot",
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Other(s) => s,
        })
    }
}
