//! Supertype closure of classes within one tree.
//!
//! Supertypes are read from the `superclass` and `interfaces` artificial
//! namespaces and resolved by raw source name. Only ancestors present in
//! the same tree are part of a closure; platform types such as
//! `java/lang/Object` are skipped without traversal.

use mc_mappings::{ClassRef, MappingTree};
use rustc_hash::FxHashSet;

/// Which supertypes a closure collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Closure {
    /// The superclass chain.
    Classes,
    /// Interfaces, including those implemented by superclasses.
    Interfaces,
    /// Both, superclass edges first.
    All,
}

impl Closure {
    const fn follows_interfaces(self) -> bool {
        !matches!(self, Self::Classes)
    }

    const fn collects(self, via_interface: bool) -> bool {
        match self {
            Self::Classes => !via_interface,
            Self::Interfaces => via_interface,
            Self::All => true,
        }
    }
}

/// Resolves supertype closures of the classes of one tree.
#[derive(Debug, Clone, Copy)]
pub struct InheritanceResolver<'t> {
    tree: &'t MappingTree,
}

impl<'t> InheritanceResolver<'t> {
    #[must_use]
    pub const fn new(tree: &'t MappingTree) -> Self {
        Self { tree }
    }

    /// Depth-first closure of the ancestors of `class` present in the tree.
    ///
    /// The superclass is visited before interfaces, interfaces in
    /// declaration order. Each raw name is visited at most once, which
    /// handles diamonds and cyclic metadata.
    #[must_use]
    pub fn supertypes(&self, class: ClassRef<'t>, closure: Closure) -> Vec<ClassRef<'t>> {
        let mut visited = FxHashSet::default();
        visited.insert(class.src_name());

        let mut out = Vec::new();
        let mut stack = Vec::new();
        push_edges(class, closure, &mut stack);

        while let Some((name, via_interface)) = stack.pop() {
            if !visited.insert(name) {
                continue;
            }
            let Some(ancestor) = self.tree.class(name) else {
                continue;
            };
            if closure.collects(via_interface) {
                out.push(ancestor);
            }
            push_edges(ancestor, closure, &mut stack);
        }

        out
    }

    /// Whether none of the direct supertypes of `class` resolve in the tree.
    ///
    /// Also true for classes without any structural data.
    #[must_use]
    pub fn is_detached(&self, class: ClassRef<'t>) -> bool {
        if !class.has_structure() {
            return true;
        }
        class
            .superclass()
            .into_iter()
            .chain(class.interfaces())
            .filter(|&name| name != class.src_name())
            .all(|name| self.tree.class(name).is_none())
    }
}

/// Push the direct supertypes of `class` so that they pop in visiting order.
fn push_edges<'t>(class: ClassRef<'t>, closure: Closure, stack: &mut Vec<(&'t str, bool)>) {
    if closure.follows_interfaces() {
        let interfaces: Vec<_> = class.interfaces().collect();
        stack.extend(interfaces.into_iter().rev().map(|name| (name, true)));
    }
    if let Some(superclass) = class.superclass() {
        stack.push((superclass, false));
    }
}

#[cfg(test)]
mod tests {
    use mc_mappings::{INTERFACES_NAMESPACE, SUPERCLASS_NAMESPACE};

    use super::*;

    /// ```text
    /// d extends c implements i2
    /// c extends b implements i1
    /// b extends java/lang/Object implements i1
    /// i1 extends i2
    /// ```
    fn tree() -> MappingTree {
        let mut tree = MappingTree::new("official", [SUPERCLASS_NAMESPACE, INTERFACES_NAMESPACE]);
        let sup = tree.namespace_id(SUPERCLASS_NAMESPACE).unwrap();
        let itf = tree.namespace_id(INTERFACES_NAMESPACE).unwrap();

        let mut class = |name: &str, superclass: &str, interfaces: &str| {
            tree.add_class(name)
                .set_name(sup, superclass)
                .set_name(itf, interfaces);
        };
        class("d", "c", "i2");
        class("c", "b", "i1");
        class("b", "java/lang/Object", "i1");
        class("i1", "java/lang/Object", "i2");
        class("i2", "java/lang/Object", "");
        class("loop", "loop", "java/lang/Runnable");
        tree
    }

    fn names<'t>(classes: &[ClassRef<'t>]) -> Vec<&'t str> {
        classes.iter().map(|class| class.src_name()).collect()
    }

    #[test]
    fn test_closure_modes() {
        let tree = tree();
        let resolver = InheritanceResolver::new(&tree);
        let d = tree.class("d").unwrap();

        assert_eq!(names(&resolver.supertypes(d, Closure::All)), vec!["c", "b", "i1", "i2"]);
        assert_eq!(names(&resolver.supertypes(d, Closure::Classes)), vec!["c", "b"]);
        assert_eq!(names(&resolver.supertypes(d, Closure::Interfaces)), vec!["i1", "i2"]);
    }

    #[test]
    fn test_cycles_and_foreign_types() {
        let tree = tree();
        let resolver = InheritanceResolver::new(&tree);
        let looped = tree.class("loop").unwrap();

        assert!(resolver.supertypes(looped, Closure::All).is_empty());
        assert!(resolver.is_detached(looped));
        assert!(resolver.is_detached(tree.class("i2").unwrap()));
        assert!(!resolver.is_detached(tree.class("b").unwrap()));
    }

    #[test]
    fn test_no_structure_is_detached() {
        let mut tree = MappingTree::new("official", ["named"]);
        tree.add_class("a");
        let resolver = InheritanceResolver::new(&tree);
        let a = tree.class("a").unwrap();
        assert!(resolver.is_detached(a));
        assert!(resolver.supertypes(a, Closure::All).is_empty());
    }

    #[test]
    fn test_empty_structure_values_are_detached() {
        let mut tree = tree();
        let sup = tree.namespace_id(SUPERCLASS_NAMESPACE).unwrap();
        let itf = tree.namespace_id(INTERFACES_NAMESPACE).unwrap();
        tree.add_class("e").set_name(sup, "").set_name(itf, " , ");

        let resolver = InheritanceResolver::new(&tree);
        let e = tree.class("e").unwrap();
        assert!(!e.has_structure());
        assert!(resolver.is_detached(e));
    }
}
