//! Ancestry nodes: one logical entity tracked across versions.

use std::collections::BTreeMap;

use mc_mappings::Version;
use rustc_hash::FxHashSet;

use crate::{AncestryError, AncestryResult, Fingerprint, FingerprintKey};

/// One logical entity across the versions where it could be tracked.
///
/// Entries are keyed by version and therefore iterate chronologically.
#[derive(Debug, Clone)]
pub struct AncestryNode<E> {
    entries: BTreeMap<Version, E>,
    /// Union of every fingerprint ever matched into this node.
    keys: FxHashSet<FingerprintKey>,
    /// Fingerprint of the first entity placed for the most recent version.
    last: Option<Fingerprint>,
    /// Persistent index, for nodes resolved through an index namespace.
    index: Option<u64>,
}

impl<E> Default for AncestryNode<E> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            keys: FxHashSet::default(),
            last: None,
            index: None,
        }
    }
}

impl<E: Copy> AncestryNode<E> {
    pub(crate) fn with_index(index: u64) -> Self {
        Self {
            index: Some(index),
            ..Self::default()
        }
    }

    /// Record the first entity matched by fingerprint for a version.
    ///
    /// Refreshes the cached fingerprint and returns the one it replaces.
    pub(crate) fn register(
        &mut self,
        version: &Version,
        entity: E,
        fingerprint: Fingerprint,
    ) -> Option<Fingerprint> {
        debug_assert!(!self.entries.contains_key(version));
        self.keys.extend(fingerprint.iter().cloned());
        self.entries.insert(version.clone(), entity);
        self.last.replace(fingerprint)
    }

    /// Merge keys of an entity that matched after the version's first one.
    pub(crate) fn merge_keys(&mut self, fingerprint: &Fingerprint) {
        self.keys.extend(fingerprint.iter().cloned());
    }

    /// Record an entity resolved through the persistent index.
    pub(crate) fn register_indexed(&mut self, version: &Version, entity: E) -> bool {
        if self.entries.contains_key(version) {
            return false;
        }
        self.entries.insert(version.clone(), entity);
        true
    }

    /// Entity recorded for a version.
    #[must_use]
    pub fn get(&self, version: &Version) -> Option<E> {
        self.entries.get(version).copied()
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = (&Version, E)> {
        self.entries.iter().map(|(version, &entity)| (version, entity))
    }

    pub fn versions(&self) -> impl DoubleEndedIterator<Item = &Version> {
        self.entries.keys()
    }

    /// Oldest entry.
    #[must_use]
    pub fn first(&self) -> Option<(&Version, E)> {
        self.entries
            .first_key_value()
            .map(|(version, &entity)| (version, entity))
    }

    /// Most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<(&Version, E)> {
        self.entries
            .last_key_value()
            .map(|(version, &entity)| (version, entity))
    }

    #[must_use]
    pub fn contains(&self, version: &Version) -> bool {
        self.entries.contains_key(version)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E> AncestryNode<E> {
    /// Every key ever matched into this node.
    #[must_use]
    pub fn keys(&self) -> &FxHashSet<FingerprintKey> {
        &self.keys
    }

    /// The cached fingerprint later versions are compared against.
    ///
    /// Fails for nodes that never cached one, i.e. nodes created purely
    /// through the persistent index.
    pub fn last_fingerprint(&self) -> AncestryResult<&Fingerprint> {
        self.last.as_ref().ok_or(AncestryError::NoFingerprint {
            index: self.index,
        })
    }

    pub(crate) fn cached(&self) -> Option<&Fingerprint> {
        self.last.as_ref()
    }

    #[must_use]
    pub fn index(&self) -> Option<u64> {
        self.index
    }
}
