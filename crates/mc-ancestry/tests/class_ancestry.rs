//! Class ancestry over several releases.

mod common;

use common::{NAMESPACES, class, init_tracing, ns, releases, version};
use mc_ancestry::{
    AncestryConfig, AncestryError, AncestryTree, ClassKeys, FingerprintKey, KeyStrategy,
    build_class_tree,
};
use mc_mappings::{ClassRef, MODIFIERS_NAMESPACE, MappingTree, Version};
use regex::Regex;

fn build(trees: &std::collections::BTreeMap<Version, MappingTree>) -> AncestryTree<ClassRef<'_>> {
    build_class_tree(trees, &AncestryConfig::default()).unwrap()
}

fn src_names<'t>(tree: &AncestryTree<ClassRef<'t>>, node: usize) -> Vec<&'t str> {
    tree.node(node)
        .unwrap()
        .entries()
        .map(|(_, class)| class.src_name())
        .collect()
}

#[test]
fn test_raw_renames_collapse_on_stable_name() {
    init_tracing();
    let trees = releases(3, &NAMESPACES, |n, tree| {
        let obf = ["a", "b", "c"][n as usize - 1];
        let intermediary = format!("class_{n}");
        class(
            tree,
            obf,
            &[("intermediary", &intermediary), ("named", "Foo")],
        );
    });

    let ancestry = build(&trees);
    assert_eq!(ancestry.len(), 1);
    assert_eq!(src_names(&ancestry, 0), vec!["a", "b", "c"]);

    let node = ancestry.node(0).unwrap();
    assert_eq!(node.first().unwrap().0, &version(1));
    assert_eq!(node.last().unwrap().0, &version(3));
    assert_eq!(node.keys().len(), 4);
}

#[test]
fn test_input_order_is_irrelevant() {
    let trees = releases(3, &NAMESPACES, |n, tree| {
        let name = if n == 2 { "Bar" } else { "Foo" };
        let intermediary = if n == 3 { "class_2" } else { "class_1" };
        class(
            tree,
            "a",
            &[("intermediary", intermediary), ("named", name)],
        );
    });

    let reversed: Vec<_> = trees.iter().rev().collect();
    let ancestry = build_class_tree(reversed, &AncestryConfig::default()).unwrap();

    // v3 only shares Foo with v1, whose fingerprint is no longer cached.
    assert_eq!(ancestry.len(), 2);
    assert_eq!(
        ancestry.versions().collect::<Vec<_>>(),
        vec![&version(1), &version(2), &version(3)]
    );
    assert_eq!(ancestry.node(0).unwrap().len(), 2);
    assert_eq!(ancestry.node(1).unwrap().first().unwrap().0, &version(3));
}

#[test]
fn test_single_version_class_is_singleton() {
    let trees = releases(3, &NAMESPACES, |n, tree| {
        class(tree, "a", &[("named", "Foo")]);
        if n == 2 {
            class(tree, "b", &[("named", "Snapshot")]);
        }
    });

    let ancestry = build(&trees);
    let node = ancestry.find_class("Snapshot").unwrap();
    assert_eq!(node.len(), 1);
    assert_eq!(node.first(), node.last());
    assert_eq!(node.first().unwrap().0, &version(2));
}

#[test]
fn test_full_rename_breaks_chain() {
    let trees = releases(2, &NAMESPACES, |n, tree| {
        if n == 1 {
            class(tree, "a", &[("intermediary", "class_1"), ("named", "Foo")]);
        } else {
            class(tree, "a", &[("intermediary", "class_9"), ("named", "Bar")]);
        }
    });

    let ancestry = build(&trees);
    assert_eq!(ancestry.len(), 2);
}

#[test]
fn test_ancestry_invariants() {
    let trees = releases(4, &NAMESPACES, |n, tree| {
        class(tree, "a", &[("intermediary", "class_1"), ("named", "Entity")]);
        let living = if n < 3 { "Mob" } else { "LivingEntity" };
        class(tree, "b", &[("intermediary", "class_2"), ("named", living)]);
        let player = format!("Player{n}");
        class(tree, "c", &[("intermediary", &player)]);
        if n % 2 == 0 {
            class(tree, "d", &[("named", "Zombie")]);
        }
    });

    let ancestry = build(&trees);

    for node in ancestry.nodes() {
        assert!(!node.keys().is_empty());

        let entries: Vec<_> = node.entries().collect();
        for pair in entries.windows(2) {
            let (v1, old) = pair[0];
            let (v2, new) = pair[1];
            let old_ns = &ancestry.version_namespaces(v1).unwrap().allowed;
            let new_ns = &ancestry.version_namespaces(v2).unwrap().allowed;
            let old_fp = ClassKeys.fingerprint(old, old_ns);
            let new_fp = ClassKeys.fingerprint(new, new_ns);
            assert!(
                new_fp.intersects(&old_fp),
                "{v1} → {v2} linked without shared names"
            );
        }
    }

    // "Player{n}" changes every version
    assert_eq!(
        ancestry
            .nodes()
            .iter()
            .filter(|node| node.first().unwrap().1.src_name() == "c")
            .count(),
        4
    );
    // Zombie skips odd versions but stays one node
    assert_eq!(ancestry.find_class("Zombie").unwrap().len(), 2);
}

#[test]
fn test_rebuild_is_isomorphic() {
    let trees = releases(3, &NAMESPACES, |n, tree| {
        for i in 0..20 {
            let named = format!("Class{}", i + n % 2);
            let intermediary = format!("class_{i}");
            class(
                tree,
                &format!("c{i}"),
                &[("intermediary", &intermediary), ("named", &named)],
            );
        }
    });

    let first = build(&trees);
    let second = build(&trees);
    assert_eq!(first.len(), second.len());

    for (a, b) in first.nodes().iter().zip(second.nodes()) {
        assert_eq!(a.keys(), b.keys());
        let a_entries: Vec<_> = a.entries().map(|(v, c)| (v, c.src_name())).collect();
        let b_entries: Vec<_> = b.entries().map(|(v, c)| (v, c.src_name())).collect();
        assert_eq!(a_entries, b_entries);
    }
}

#[test]
fn test_artificial_namespaces_do_not_link() {
    let namespaces = ["named", MODIFIERS_NAMESPACE];
    let trees = releases(2, &namespaces, |n, tree| {
        let (a, b) = if n == 1 { ("A", "B") } else { ("C", "D") };
        class(tree, "a", &[("named", a), (MODIFIERS_NAMESPACE, "1")]);
        class(tree, "b", &[("named", b), (MODIFIERS_NAMESPACE, "1")]);
    });

    assert_eq!(build(&trees).len(), 4);
}

#[test]
fn test_configured_namespace_subset() {
    let trees = releases(2, &NAMESPACES, |n, tree| {
        let intermediary = format!("class_{n}");
        class(
            tree,
            "a",
            &[("intermediary", &intermediary), ("named", "Foo")],
        );
    });

    let config = AncestryConfig::default().with_namespaces(["intermediary", "yarn"]);
    let ancestry = build_class_tree(&trees, &config).unwrap();
    assert_eq!(ancestry.len(), 2);

    let v1 = ancestry.version_namespaces(&version(1)).unwrap();
    assert_eq!(v1.allowed.len(), 1);
}

#[test]
fn test_index_namespace_links_full_renames() {
    let namespaces = ["named", "index"];
    let trees = releases(3, &namespaces, |n, tree| {
        let named = format!("Renamed{n}");
        class(tree, "a", &[("named", &named), ("index", "12")]);
        class(tree, "b", &[("named", "Stable"), ("index", "none")]);
    });

    let config = AncestryConfig::default().with_index_namespace("index");
    let ancestry = build_class_tree(&trees, &config).unwrap();
    assert_eq!(ancestry.len(), 2);

    let indexed = ancestry.find_by_index(12).unwrap();
    assert_eq!(indexed.len(), 3);
    assert!(indexed.keys().is_empty());
    assert!(matches!(
        indexed.last_fingerprint(),
        Err(AncestryError::NoFingerprint { index: Some(12) })
    ));

    // The index namespace never contributes keys
    let stable = ancestry.find_class("Stable").unwrap();
    assert_eq!(stable.len(), 3);
    assert!(!stable
        .keys()
        .contains(&FingerprintKey::Name("none".to_owned())));
}

#[test]
fn test_find_matching_uses_latest_names() {
    let trees = releases(2, &NAMESPACES, |n, tree| {
        let named = if n == 1 {
            "net/minecraft/entity/Entity"
        } else {
            "net/minecraft/world/entity/Entity"
        };
        class(tree, "a", &[("intermediary", "class_1297"), ("named", named)]);
        class(tree, "b", &[("intermediary", "class_1937"), ("named", "net/minecraft/world/level/Level")]);
    });

    let ancestry = build(&trees);

    let pattern = Regex::new(r"^net/minecraft/world/.*Entity$").unwrap();
    let found: Vec<_> = ancestry.find_matching(&pattern).collect();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].last().unwrap().1.src_name(), "a");

    let old = Regex::new(r"^net/minecraft/entity/").unwrap();
    assert_eq!(ancestry.find_matching(&old).count(), 0);
    // but the old name is still part of the keys
    assert!(ancestry.find_class("net/minecraft/entity/Entity").is_some());
}

#[test]
fn test_find_by_keys() {
    let trees = releases(1, &NAMESPACES, |_, tree| {
        class(tree, "a", &[("named", "Foo")]);
        class(tree, "b", &[("named", "Bar")]);
    });
    let ancestry = build(&trees);

    let keys = [
        FingerprintKey::Name("Missing".to_owned()),
        FingerprintKey::Name("Bar".to_owned()),
    ];
    let node = ancestry.find_by_keys(&keys).unwrap();
    assert_eq!(node.first().unwrap().1.src_name(), "b");
    assert!(ancestry.find_by_keys(&keys[..1]).is_none());
}

#[test]
fn test_unnamed_classes_are_not_tracked() {
    let trees = releases(2, &NAMESPACES, |_, tree| {
        class(tree, "a", &[]);
    });
    let ancestry = build(&trees);
    assert!(ancestry.is_empty());
    // Namespaces are still recorded for every version
    assert_eq!(ancestry.versions().count(), 2);
    let tree = trees.values().next().unwrap();
    assert_eq!(
        ancestry.version_namespaces(&version(1)).unwrap().allowed,
        vec![ns(tree, "intermediary"), ns(tree, "named")]
    );
}
