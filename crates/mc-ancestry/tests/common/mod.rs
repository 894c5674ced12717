//! Helpers for building small mapping trees in tests.

#![allow(dead_code)]

use std::collections::BTreeMap;

use mc_mappings::{ClassMapping, MappingTree, NamespaceId, Version};
use tracing_subscriber::EnvFilter;

pub const NAMESPACES: [&str; 2] = ["intermediary", "named"];

/// Route `tracing` output through the test harness (`RUST_LOG=debug`).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn version(n: u64) -> Version {
    Version::release(format!("1.{n}"), n * 1000)
}

pub fn ns(tree: &MappingTree, name: &str) -> NamespaceId {
    tree.namespace_id(name)
        .unwrap_or_else(|| panic!("namespace {name} missing"))
}

/// Add a class named `(namespace, name)` in each listed namespace.
pub fn class<'a>(
    tree: &'a mut MappingTree,
    src: &str,
    names: &[(&str, &str)],
) -> &'a mut ClassMapping {
    let ids: Vec<_> = names
        .iter()
        .map(|(namespace, name)| (ns(tree, namespace), *name))
        .collect();
    let class = tree.add_class(src);
    for (id, name) in ids {
        class.set_name(id, name);
    }
    class
}

/// Versioned trees keyed by `version(n)`.
pub fn releases(
    count: u64,
    namespaces: &[&str],
    mut fill: impl FnMut(u64, &mut MappingTree),
) -> BTreeMap<Version, MappingTree> {
    (1..=count)
        .map(|n| {
            let mut tree = MappingTree::new("official", namespaces.iter().copied());
            fill(n, &mut tree);
            (version(n), tree)
        })
        .collect()
}
