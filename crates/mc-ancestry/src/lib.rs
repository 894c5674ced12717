//! Cross-version identity tracking for classes and members.
//!
//! Mapping trees of successive releases name the same class independently.
//! This crate links those per-release entities into [`AncestryNode`]s, one
//! per logical class, field or method, by intersecting namespaced names
//! between consecutive versions.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │  build_class_tree(trees, config)                                   │
//! │    - sorts versions by release time                                │
//! │    - resolves allowed namespaces per version (NamespaceTable)      │
//! │    - AncestryTreeBuilder<ClassRef, ClassKeys>                      │
//! └────────────────────────────────────────────────────────────────────┘
//!                              │ freeze()
//!                              ▼
//! ┌────────────────────────────────────────────────────────────────────┐
//! │  AncestryTree<ClassRef>                                            │
//! │    - find_by_keys / find_matching / find_class / find_by_index     │
//! │    - per-version namespace bookkeeping                             │
//! └────────────────────────────────────────────────────────────────────┘
//!                              │ per class node (parallel)
//!                              ▼
//! ┌────────────────────────────────────────────────────────────────────┐
//! │  derive_fields / derive_methods                                    │
//! │    - same builder, FieldKeys / MethodKeys strategies               │
//! │    - AncestryTree<FieldRef> / AncestryTree<MethodRef>, find(..)    │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use mc_ancestry::{AncestryConfig, build_class_tree};
//! use mc_mappings::{MappingTree, Version};
//!
//! let mut trees = BTreeMap::new();
//! for (id, time, obf) in [("1.0", 1, "a"), ("1.1", 2, "b")] {
//!     let mut tree = MappingTree::new("official", ["named"]);
//!     let named = tree.namespace_id("named").unwrap();
//!     tree.add_class(obf).set_name(named, "Entity");
//!     trees.insert(Version::release(id, time), tree);
//! }
//!
//! let ancestry = build_class_tree(&trees, &AncestryConfig::default()).unwrap();
//! assert_eq!(ancestry.len(), 1);
//! ```

mod builder;
mod config;
mod error;
mod fingerprint;
mod member;
mod node;
mod strategy;
mod tree;

pub use builder::{AncestryTreeBuilder, build_class_tree};
pub use config::AncestryConfig;
pub use error::{AncestryError, AncestryResult};
pub use fingerprint::{Fingerprint, FingerprintKey};
pub use member::{derive_all_fields, derive_all_methods, derive_fields, derive_methods};
pub use node::AncestryNode;
pub use strategy::{ClassKeys, ConstructorMode, FieldKeys, KeyStrategy, MethodKeys};
pub use tree::{AncestryTree, VersionNamespaces};
