//! Release versions.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of release as published in the version manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseType {
    Release,
    Snapshot,
    OldBeta,
    OldAlpha,
}

/// A single game release.
///
/// Versions order by release time, then by identifier, so a sorted
/// collection of versions is chronological. Equality follows the same
/// fields so `Ord` and `Eq` agree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
    /// Manifest identifier, e.g. `1.20.1` or `23w31a`.
    pub id: String,
    /// Release kind.
    #[serde(rename = "type")]
    pub release_type: ReleaseType,
    /// Release timestamp in unix milliseconds.
    pub release_time: u64,
}

impl Version {
    /// Create a new version.
    #[must_use]
    pub fn new(id: impl Into<String>, release_type: ReleaseType, release_time: u64) -> Self {
        Self {
            id: id.into(),
            release_type,
            release_time,
        }
    }

    /// Shorthand for a full release.
    #[must_use]
    pub fn release(id: impl Into<String>, release_time: u64) -> Self {
        Self::new(id, ReleaseType::Release, release_time)
    }

    /// Shorthand for a snapshot.
    #[must_use]
    pub fn snapshot(id: impl Into<String>, release_time: u64) -> Self {
        Self::new(id, ReleaseType::Snapshot, release_time)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.release_time
            .cmp(&other.release_time)
            .then_with(|| self.id.cmp(&other.id))
            .then_with(|| (self.release_type as u8).cmp(&(other.release_type as u8)))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
