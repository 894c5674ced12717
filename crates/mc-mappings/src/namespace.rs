//! Namespace identifiers and per-version resolution.
//!
//! Namespace ids are indices into one tree's destination namespace list.
//! Two releases may order their namespaces differently, so an id is only
//! meaningful together with the version it was resolved for. Code that works
//! across versions goes through [`NamespaceTable`] instead of caching ids.

use std::fmt;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::{MappingError, MappingResult, MappingTree, Version};

/// Namespace carrying access flags as a decimal integer.
pub const MODIFIERS_NAMESPACE: &str = "modifiers";

/// Namespace carrying the raw superclass source name.
pub const SUPERCLASS_NAMESPACE: &str = "superclass";

/// Namespace carrying comma-separated raw interface source names.
pub const INTERFACES_NAMESPACE: &str = "interfaces";

/// Returns true for namespaces that carry structural data instead of names.
#[must_use]
pub fn is_artificial(name: &str) -> bool {
    matches!(
        name,
        MODIFIERS_NAMESPACE | SUPERCLASS_NAMESPACE | INTERFACES_NAMESPACE
    )
}

/// Index of a destination namespace within one tree.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespaceId(u16);

impl NamespaceId {
    /// Create a namespace ID from a raw index.
    #[must_use]
    pub const fn from_raw(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw index.
    #[must_use]
    pub const fn as_raw(self) -> u16 {
        self.0
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NamespaceId({})", self.0)
    }
}

/// Explicit `(version, namespace name) → id` table.
#[derive(Debug, Clone, Default)]
pub struct NamespaceTable {
    ids: FxHashMap<Version, FxHashMap<String, NamespaceId>>,
    mapped: FxHashMap<Version, Vec<NamespaceId>>,
}

impl NamespaceTable {
    /// Build the table for a set of versioned trees.
    pub fn from_trees<'t>(trees: impl IntoIterator<Item = (&'t Version, &'t MappingTree)>) -> Self {
        let mut table = Self::default();
        for (version, tree) in trees {
            table.insert(version, tree);
        }
        table
    }

    /// Register (or replace) the namespaces of one version.
    pub fn insert(&mut self, version: &Version, tree: &MappingTree) {
        let ids = tree
            .dst_namespaces()
            .map(|(id, name)| (name.to_owned(), id))
            .collect();
        self.ids.insert(version.clone(), ids);
        let mapped: Vec<_> = tree.mapped_namespaces().collect();
        trace!(
            "{version}: {} namespaces, {} mapped",
            tree.dst_namespaces().count(),
            mapped.len()
        );
        self.mapped.insert(version.clone(), mapped);
    }

    /// Resolve a namespace name in a version.
    ///
    /// Fails when the version was never registered; returns `Ok(None)` when
    /// the version exists but lacks the namespace.
    pub fn resolve(&self, version: &Version, name: &str) -> MappingResult<Option<NamespaceId>> {
        let ids = self
            .ids
            .get(version)
            .ok_or_else(|| MappingError::UnknownVersion(version.clone()))?;
        Ok(ids.get(name).copied())
    }

    /// Every mapped (non-artificial) namespace of a version, in tree order.
    pub fn mapped(&self, version: &Version) -> MappingResult<&[NamespaceId]> {
        self.mapped
            .get(version)
            .map(Vec::as_slice)
            .ok_or_else(|| MappingError::UnknownVersion(version.clone()))
    }

    /// Resolve a list of names, silently dropping those the version lacks.
    pub fn resolve_all<S: AsRef<str>>(
        &self,
        version: &Version,
        names: &[S],
    ) -> MappingResult<Vec<NamespaceId>> {
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            if let Some(id) = self.resolve(version, name.as_ref())? {
                ids.push(id);
            }
        }
        Ok(ids)
    }
}
