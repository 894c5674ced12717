//! Frozen ancestry trees and their query surface.

use std::collections::BTreeMap;

use mc_mappings::{CONSTRUCTOR_NAME, ClassRef, Member, NamespaceId, Version};
use regex::Regex;
use rustc_hash::FxHashMap;

use crate::{AncestryNode, FingerprintKey};

/// Namespaces a tree used while matching one version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionNamespaces {
    /// Namespaces contributing to fingerprints.
    pub allowed: Vec<NamespaceId>,
    /// Namespace holding persistent indices, if configured and present.
    pub index: Option<NamespaceId>,
}

/// Immutable result of an [`AncestryTreeBuilder`](crate::AncestryTreeBuilder).
#[derive(Debug, Clone)]
pub struct AncestryTree<E> {
    nodes: Vec<AncestryNode<E>>,
    by_index: FxHashMap<u64, usize>,
    versions: BTreeMap<Version, VersionNamespaces>,
}

impl<E> AncestryTree<E> {
    pub(crate) fn new(
        nodes: Vec<AncestryNode<E>>,
        by_index: FxHashMap<u64, usize>,
        versions: BTreeMap<Version, VersionNamespaces>,
    ) -> Self {
        Self {
            nodes,
            by_index,
            versions,
        }
    }

    /// Nodes in creation order.
    #[must_use]
    pub fn nodes(&self) -> &[AncestryNode<E>] {
        &self.nodes
    }

    #[must_use]
    pub fn node(&self, index: usize) -> Option<&AncestryNode<E>> {
        self.nodes.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Versions processed by the builder, oldest first.
    pub fn versions(&self) -> impl DoubleEndedIterator<Item = &Version> {
        self.versions.keys()
    }

    /// Namespace bookkeeping of one version.
    #[must_use]
    pub fn version_namespaces(&self, version: &Version) -> Option<&VersionNamespaces> {
        self.versions.get(version)
    }

    /// First node whose keys intersect `candidates`.
    pub fn find_by_keys<'k>(
        &self,
        candidates: impl IntoIterator<Item = &'k FingerprintKey>,
    ) -> Option<&AncestryNode<E>> {
        let candidates: Vec<_> = candidates.into_iter().collect();
        self.nodes
            .iter()
            .find(|node| candidates.iter().any(|key| node.keys().contains(*key)))
    }

    /// Node registered under a persistent index.
    #[must_use]
    pub fn find_by_index(&self, index: u64) -> Option<&AncestryNode<E>> {
        self.by_index.get(&index).map(|&slot| &self.nodes[slot])
    }
}

impl<'t> AncestryTree<ClassRef<'t>> {
    /// Nodes whose most recent fingerprint has a name matching `pattern`.
    ///
    /// Index-only nodes carry no fingerprint and never match.
    pub fn find_matching<'a>(
        &'a self,
        pattern: &'a Regex,
    ) -> impl Iterator<Item = &'a AncestryNode<ClassRef<'t>>> + 'a {
        self.nodes.iter().filter(move |node| {
            node.cached().is_some_and(|fingerprint| {
                fingerprint
                    .iter()
                    .filter_map(FingerprintKey::name)
                    .any(|name| pattern.is_match(name))
            })
        })
    }

    /// Node of the class that has ever been called `name`.
    #[must_use]
    pub fn find_class(&self, name: &str) -> Option<&AncestryNode<ClassRef<'t>>> {
        self.find_by_keys([&FingerprintKey::Name(name.to_owned())])
    }
}

fn desc_matches(actual: &str, prefix: Option<&str>) -> bool {
    prefix.is_none_or(|prefix| actual.starts_with(prefix))
}

fn key_matches(key: &FingerprintKey, name: &str, desc: Option<&str>) -> bool {
    match key {
        FingerprintKey::Member {
            name: key_name,
            desc: key_desc,
        } => key_name == name && desc_matches(key_desc, desc),
        FingerprintKey::Constructor { desc: key_desc } => {
            name == CONSTRUCTOR_NAME && desc_matches(key_desc, desc)
        }
        FingerprintKey::Name(_) => false,
    }
}

impl<'t, M: Member<'t>> AncestryTree<M> {
    /// Find a member node by name and optional descriptor prefix.
    ///
    /// With a version, that version's recorded names and mapped descriptors
    /// are compared in every namespace the version was matched with.
    /// Without one, the cached most recent fingerprint is compared. The
    /// descriptor is a prefix, so `(I` finds `(IJ)V`.
    #[must_use]
    pub fn find(
        &self,
        name: &str,
        desc: Option<&str>,
        version: Option<&Version>,
    ) -> Option<&AncestryNode<M>> {
        match version {
            Some(version) => {
                let namespaces = self.versions.get(version)?;
                self.nodes.iter().find(|node| {
                    node.get(version).is_some_and(|member| {
                        namespaces
                            .allowed
                            .iter()
                            .any(|&ns| member_matches(member, ns, name, desc))
                    })
                })
            }
            None => self.nodes.iter().find(|node| {
                node.cached()
                    .is_some_and(|fp| fp.iter().any(|key| key_matches(key, name, desc)))
            }),
        }
    }
}

fn member_matches<'t, M: Member<'t>>(
    member: M,
    ns: NamespaceId,
    name: &str,
    desc: Option<&str>,
) -> bool {
    let actual = if member.src_name() == CONSTRUCTOR_NAME {
        Some(CONSTRUCTOR_NAME)
    } else {
        member.dst_name(ns)
    };
    actual == Some(name) && desc_matches(&member.dst_desc(ns), desc)
}
