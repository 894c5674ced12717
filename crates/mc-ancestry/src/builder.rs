//! Incremental ancestry building.
//!
//! # Matching
//!
//! Versions are consumed oldest first. For every entity of a version:
//!
//! ```text
//! index namespace set and entity carries an integer there?
//!   yes → node from the index table (created on first sight), done
//!   no  → fingerprint = keys in the allowed namespaces
//!         first node (creation order) whose cached fingerprint intersects
//!         it, else a new node
//!         first entity of this version in the node refreshes the cache
//! ```
//!
//! Only the cache (the most recent version's fingerprint) is compared, never
//! the full key history. An entity whose names all change at once starts a
//! new node unless the index namespace links it.

use std::collections::BTreeMap;
use std::fmt;

use mc_mappings::{ClassRef, MappingTree, NamespaceTable, Version};
use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::{
    AncestryConfig, AncestryError, AncestryNode, AncestryResult, AncestryTree, ClassKeys,
    Fingerprint, FingerprintKey, KeyStrategy, VersionNamespaces,
};

/// Mutable accumulator for an [`AncestryTree`].
pub struct AncestryTreeBuilder<E, S> {
    strategy: S,
    nodes: Vec<AncestryNode<E>>,
    /// Persistent index → node slot.
    by_index: FxHashMap<u64, usize>,
    /// Key → slots whose cached fingerprint currently contains it.
    cached_keys: FxHashMap<FingerprintKey, Vec<usize>>,
    versions: BTreeMap<Version, VersionNamespaces>,
}

/// Per-version counters for logging.
#[derive(Debug, Default)]
struct Tally {
    matched: usize,
    created: usize,
    indexed: usize,
    untracked: usize,
    collisions: usize,
}

impl<E, S> AncestryTreeBuilder<E, S>
where
    E: Copy + fmt::Debug,
    S: KeyStrategy<E>,
{
    pub fn new(strategy: S) -> Self {
        Self {
            strategy,
            nodes: Vec::new(),
            by_index: FxHashMap::default(),
            cached_keys: FxHashMap::default(),
            versions: BTreeMap::new(),
        }
    }

    /// Match every entity of one version into the tree.
    ///
    /// `version` must be strictly newer than every version inserted so far.
    pub fn insert_version<I>(
        &mut self,
        version: &Version,
        namespaces: VersionNamespaces,
        entities: I,
    ) -> AncestryResult<()>
    where
        I: IntoIterator<Item = E>,
    {
        if let Some((previous, _)) = self.versions.last_key_value() {
            if previous >= version {
                return Err(AncestryError::VersionOutOfOrder {
                    version: version.clone(),
                    previous: previous.clone(),
                });
            }
        }

        let mut tally = Tally::default();
        for entity in entities {
            if !self.strategy.accepts(entity) {
                continue;
            }

            let index = namespaces
                .index
                .and_then(|ns| self.strategy.index(entity, ns));
            if let Some(index) = index {
                self.place_indexed(version, index, entity, &mut tally);
                continue;
            }

            let fingerprint = self.strategy.fingerprint(entity, &namespaces.allowed);
            if fingerprint.is_empty() {
                trace!("{entity:?} has no names in {version}, not tracked");
                tally.untracked += 1;
                continue;
            }

            self.place(version, entity, fingerprint, &mut tally);
        }

        debug!(
            "{version}: {} matched, {} new, {} indexed, {} untracked, {} collisions, {} nodes",
            tally.matched,
            tally.created,
            tally.indexed,
            tally.untracked,
            tally.collisions,
            self.nodes.len()
        );

        self.versions.insert(version.clone(), namespaces);
        Ok(())
    }

    fn place_indexed(&mut self, version: &Version, index: u64, entity: E, tally: &mut Tally) {
        let slot = match self.by_index.get(&index) {
            Some(&slot) => slot,
            None => {
                self.nodes.push(AncestryNode::with_index(index));
                let slot = self.nodes.len() - 1;
                self.by_index.insert(index, slot);
                slot
            }
        };

        if self.nodes[slot].register_indexed(version, entity) {
            tally.indexed += 1;
        } else {
            warn!("{entity:?} reuses index {index} already taken in {version}");
            tally.collisions += 1;
        }
    }

    fn place(&mut self, version: &Version, entity: E, fingerprint: Fingerprint, tally: &mut Tally) {
        let slot = match self.find_match(&fingerprint) {
            Some(slot) => {
                tally.matched += 1;
                slot
            }
            None => {
                trace!("{entity:?} starts a new node in {version}");
                tally.created += 1;
                self.nodes.push(AncestryNode::default());
                self.nodes.len() - 1
            }
        };

        if self.nodes[slot].contains(version) {
            trace!("{entity:?} matched a node already holding an entity for {version}");
            tally.collisions += 1;
            self.nodes[slot].merge_keys(&fingerprint);
            return;
        }

        let added: Vec<FingerprintKey> = fingerprint.iter().cloned().collect();
        if let Some(previous) = self.nodes[slot].register(version, entity, fingerprint) {
            self.uncache(slot, &previous);
        }
        for key in added {
            self.cached_keys.entry(key).or_default().push(slot);
        }
    }

    /// First node in creation order whose cached fingerprint intersects
    /// `fingerprint`.
    fn find_match(&self, fingerprint: &Fingerprint) -> Option<usize> {
        fingerprint
            .iter()
            .filter_map(|key| self.cached_keys.get(key))
            .flatten()
            .copied()
            .filter(|&slot| {
                self.nodes[slot]
                    .cached()
                    .is_some_and(|cached| self.strategy.compatible(fingerprint, cached))
            })
            .min()
    }

    fn uncache(&mut self, slot: usize, previous: &Fingerprint) {
        for key in previous {
            if let Some(slots) = self.cached_keys.get_mut(key) {
                slots.retain(|&s| s != slot);
                if slots.is_empty() {
                    self.cached_keys.remove(key);
                }
            }
        }
    }

    /// Number of nodes created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Finish building.
    pub fn freeze(self) -> AncestryTree<E> {
        AncestryTree::new(self.nodes, self.by_index, self.versions)
    }
}

/// Resolve the allowed and index namespaces of one version.
pub(crate) fn resolve_namespaces(
    table: &NamespaceTable,
    version: &Version,
    config: &AncestryConfig,
) -> AncestryResult<VersionNamespaces> {
    let index = match &config.index_namespace {
        Some(name) => table.resolve(version, name)?,
        None => None,
    };

    let mut allowed = match &config.namespaces {
        Some(names) => table.resolve_all(version, names)?,
        None => table.mapped(version)?.to_vec(),
    };
    allowed.retain(|&ns| Some(ns) != index);

    Ok(VersionNamespaces { allowed, index })
}

/// Build the class ancestry tree over a set of versioned trees.
///
/// The input is sorted by release time here; callers may pass versions in
/// any order.
pub fn build_class_tree<'t, I>(
    trees: I,
    config: &AncestryConfig,
) -> AncestryResult<AncestryTree<ClassRef<'t>>>
where
    I: IntoIterator<Item = (&'t Version, &'t MappingTree)>,
{
    let mut sorted: Vec<_> = trees.into_iter().collect();
    sorted.sort_by(|(a, _), (b, _)| a.cmp(b));

    let table = NamespaceTable::from_trees(sorted.iter().copied());
    let mut builder = AncestryTreeBuilder::new(ClassKeys);

    for (version, tree) in sorted {
        let namespaces = resolve_namespaces(&table, version, config)?;
        builder.insert_version(version, namespaces, tree.classes())?;
    }

    let tree = builder.freeze();
    debug!(
        "class ancestry: {} nodes over {} versions",
        tree.len(),
        tree.versions().count()
    );
    Ok(tree)
}
