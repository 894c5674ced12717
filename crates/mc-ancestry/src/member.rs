//! Member ancestry, derived per class node.
//!
//! A member tree reruns the builder over the fields or methods a class node
//! holds in each of its versions. It reuses the namespaces the class tree
//! resolved for those versions, so a class and its members are always
//! matched under the same rules.
//!
//! Member trees of different class nodes share nothing and are built in
//! parallel by the `derive_all_*` functions.

use std::fmt;

use mc_mappings::{ClassRef, FieldRef, MethodRef};
use rayon::prelude::*;

use crate::{
    AncestryError, AncestryNode, AncestryResult, AncestryTree, AncestryTreeBuilder,
    ConstructorMode, FieldKeys, KeyStrategy, MethodKeys,
};

fn derive<'t, E, S, I>(
    classes: &AncestryTree<ClassRef<'t>>,
    node: &AncestryNode<ClassRef<'t>>,
    strategy: S,
    members: impl Fn(ClassRef<'t>) -> I,
) -> AncestryResult<AncestryTree<E>>
where
    E: Copy + fmt::Debug,
    S: KeyStrategy<E>,
    I: IntoIterator<Item = E>,
{
    let mut builder = AncestryTreeBuilder::new(strategy);
    for (version, class) in node.entries() {
        let namespaces = classes
            .version_namespaces(version)
            .ok_or_else(|| AncestryError::UnknownVersion(version.clone()))?;
        builder.insert_version(version, namespaces.clone(), members(class))?;
    }
    Ok(builder.freeze())
}

/// Field ancestry of one class node.
pub fn derive_fields<'t>(
    classes: &AncestryTree<ClassRef<'t>>,
    node: &AncestryNode<ClassRef<'t>>,
) -> AncestryResult<AncestryTree<FieldRef<'t>>> {
    derive(classes, node, FieldKeys, ClassRef::fields)
}

/// Method ancestry of one class node.
pub fn derive_methods<'t>(
    classes: &AncestryTree<ClassRef<'t>>,
    node: &AncestryNode<ClassRef<'t>>,
    mode: ConstructorMode,
) -> AncestryResult<AncestryTree<MethodRef<'t>>> {
    derive(classes, node, MethodKeys::new(mode), ClassRef::methods)
}

/// Field ancestry of every class node, in node order.
pub fn derive_all_fields<'t>(
    classes: &AncestryTree<ClassRef<'t>>,
) -> AncestryResult<Vec<AncestryTree<FieldRef<'t>>>> {
    classes
        .nodes()
        .par_iter()
        .map(|node| derive_fields(classes, node))
        .collect()
}

/// Method ancestry of every class node, in node order.
pub fn derive_all_methods<'t>(
    classes: &AncestryTree<ClassRef<'t>>,
    mode: ConstructorMode,
) -> AncestryResult<Vec<AncestryTree<MethodRef<'t>>>> {
    classes
        .nodes()
        .par_iter()
        .map(|node| derive_methods(classes, node, mode))
        .collect()
}
