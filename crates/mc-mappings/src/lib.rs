//! Versioned, multi-namespace mapping trees.
//!
//! Every Minecraft release ships its own mapping data: the same class,
//! field or method is named independently by several naming schemes
//! (obfuscated, intermediary, community names, ...). This crate models one
//! release's data as a [`MappingTree`] and provides the pieces the ancestry
//! and analysis crates build on:
//!
//! - **[`Version`]**: release identifier, type and timestamp (ordered by time)
//! - **[`MappingTree`]**: classes with fields and methods, one name slot per
//!   destination namespace
//! - **[`ClassRef`] / [`FieldRef`] / [`MethodRef`]**: cheap `Copy` views
//!   borrowing a tree
//! - **[`NamespaceTable`]**: `(version, namespace name) → id` resolution
//!
//! # Artificial namespaces
//!
//! Structural data that is not a name travels through namespaces with fixed
//! names. When a tree carries them:
//!
//! ```text
//! modifiers   "4129"                     access flags as a decimal integer
//! superclass  "net/minecraft/class_1297" raw superclass source name
//! interfaces  "a/b,a/c"                  raw interface source names
//! ```
//!
//! They are never treated as mapped names. A tree without them simply has
//! no structural data to offer.
//!
//! # Usage
//!
//! ```
//! use mc_mappings::MappingTree;
//!
//! let mut tree = MappingTree::new("official", ["named", "modifiers"]);
//! let named = tree.namespace_id("named").unwrap();
//!
//! tree.add_class("a").set_name(named, "net/minecraft/Entity");
//! let class = tree.class("a").unwrap();
//! assert_eq!(class.dst_name(named), Some("net/minecraft/Entity"));
//! ```

mod access;
pub mod descriptor;
mod entity;
mod error;
mod namespace;
mod tree;
mod version;

pub use access::Access;
pub use entity::{ClassRef, FieldRef, Member, MethodRef};
pub use error::{ConfigError, MappingError, MappingResult};
pub use namespace::{
    INTERFACES_NAMESPACE, MODIFIERS_NAMESPACE, NamespaceId, NamespaceTable, SUPERCLASS_NAMESPACE,
    is_artificial,
};
pub use tree::{ClassMapping, FieldMapping, MappingTree, MethodMapping};
pub use version::{ReleaseType, Version};

/// Source name shared by every constructor.
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Source name shared by every static initializer.
pub const STATIC_INITIALIZER_NAME: &str = "<clinit>";

/// Separator between an owner and a nested class in raw names.
pub const INNER_CLASS_SEPARATOR: char = '$';
