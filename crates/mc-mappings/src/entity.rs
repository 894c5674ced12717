//! Borrowed views over tree entities.
//!
//! Views are `Copy` handles of a tree reference plus an index, so they can be
//! stored freely (e.g. one per version inside an ancestry node) without
//! cloning mapping data. They stay valid for as long as the tree is borrowed.

use std::fmt;
use std::ptr;

use crate::{
    Access, CONSTRUCTOR_NAME, FieldMapping, MappingTree, MethodMapping, NamespaceId,
    STATIC_INITIALIZER_NAME, tree::ClassMapping,
};

/// A class inside a [`MappingTree`].
#[derive(Clone, Copy)]
pub struct ClassRef<'t> {
    tree: &'t MappingTree,
    index: usize,
}

impl<'t> ClassRef<'t> {
    pub(crate) const fn new(tree: &'t MappingTree, index: usize) -> Self {
        Self { tree, index }
    }

    fn mapping(self) -> &'t ClassMapping {
        self.tree.class_at(self.index)
    }

    /// The tree this class belongs to.
    #[must_use]
    pub const fn tree(self) -> &'t MappingTree {
        self.tree
    }

    #[must_use]
    pub fn src_name(self) -> &'t str {
        self.mapping().src_name()
    }

    #[must_use]
    pub fn dst_name(self, ns: NamespaceId) -> Option<&'t str> {
        self.mapping().dst_name(ns)
    }

    /// Raw modifier string, if the tree has a modifiers namespace.
    #[must_use]
    pub fn raw_modifiers(self) -> Option<&'t str> {
        self.dst_name(self.tree.artificial().modifiers?)
    }

    /// Parsed access flags.
    #[must_use]
    pub fn access(self) -> Option<Access> {
        self.raw_modifiers().and_then(Access::parse)
    }

    /// Raw superclass source name.
    #[must_use]
    pub fn superclass(self) -> Option<&'t str> {
        self.dst_name(self.tree.artificial().superclass?)
            .filter(|name| !name.is_empty())
    }

    /// Raw interface source names in declaration order.
    pub fn interfaces(self) -> impl Iterator<Item = &'t str> {
        self.tree
            .artificial()
            .interfaces
            .and_then(|ns| self.dst_name(ns))
            .into_iter()
            .flat_map(|raw| raw.split(','))
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Whether the tree holds any superclass or interface data for this class.
    #[must_use]
    pub fn has_structure(self) -> bool {
        self.superclass().is_some() || self.interfaces().next().is_some()
    }

    pub fn fields(self) -> impl ExactSizeIterator<Item = FieldRef<'t>> {
        (0..self.mapping().fields().len()).map(move |index| FieldRef { class: self, index })
    }

    pub fn methods(self) -> impl ExactSizeIterator<Item = MethodRef<'t>> {
        (0..self.mapping().methods().len()).map(move |index| MethodRef { class: self, index })
    }

    /// Find a field by source name and descriptor.
    #[must_use]
    pub fn field(self, name: &str, desc: &str) -> Option<FieldRef<'t>> {
        self.fields()
            .find(|f| f.src_name() == name && f.src_desc() == desc)
    }

    /// Find a method by source name and descriptor.
    #[must_use]
    pub fn method(self, name: &str, desc: &str) -> Option<MethodRef<'t>> {
        self.methods()
            .find(|m| m.src_name() == name && m.src_desc() == desc)
    }
}

impl PartialEq for ClassRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl Eq for ClassRef<'_> {}

impl fmt::Debug for ClassRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassRef({})", self.src_name())
    }
}

/// Behaviour shared by fields and methods.
pub trait Member<'t>: Copy + fmt::Debug {
    /// The declaring class.
    fn owner(self) -> ClassRef<'t>;

    fn src_name(self) -> &'t str;

    fn src_desc(self) -> &'t str;

    fn dst_name(self, ns: NamespaceId) -> Option<&'t str>;

    /// Source descriptor mapped into a namespace.
    fn dst_desc(self, ns: NamespaceId) -> String {
        self.owner().tree().map_desc(self.src_desc(), ns)
    }

    /// Raw modifier string, if the tree has a modifiers namespace.
    fn raw_modifiers(self) -> Option<&'t str> {
        self.dst_name(self.owner().tree().artificial().modifiers?)
    }

    /// Parsed access flags.
    fn access(self) -> Option<Access> {
        self.raw_modifiers().and_then(Access::parse)
    }
}

/// A field inside a class view.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FieldRef<'t> {
    class: ClassRef<'t>,
    index: usize,
}

impl<'t> FieldRef<'t> {
    fn mapping(self) -> &'t FieldMapping {
        &self.class.mapping().fields()[self.index]
    }
}

impl<'t> Member<'t> for FieldRef<'t> {
    fn owner(self) -> ClassRef<'t> {
        self.class
    }

    fn src_name(self) -> &'t str {
        self.mapping().src_name()
    }

    fn src_desc(self) -> &'t str {
        self.mapping().src_desc()
    }

    fn dst_name(self, ns: NamespaceId) -> Option<&'t str> {
        self.mapping().dst_name(ns)
    }
}

impl fmt::Debug for FieldRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FieldRef({}.{}:{})",
            self.class.src_name(),
            self.src_name(),
            self.src_desc()
        )
    }
}

/// A method inside a class view.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct MethodRef<'t> {
    class: ClassRef<'t>,
    index: usize,
}

impl<'t> MethodRef<'t> {
    fn mapping(self) -> &'t MethodMapping {
        &self.class.mapping().methods()[self.index]
    }

    #[must_use]
    pub fn is_constructor(self) -> bool {
        self.src_name() == CONSTRUCTOR_NAME
    }

    #[must_use]
    pub fn is_static_initializer(self) -> bool {
        self.src_name() == STATIC_INITIALIZER_NAME
    }
}

impl<'t> Member<'t> for MethodRef<'t> {
    fn owner(self) -> ClassRef<'t> {
        self.class
    }

    fn src_name(self) -> &'t str {
        self.mapping().src_name()
    }

    fn src_desc(self) -> &'t str {
        self.mapping().src_desc()
    }

    fn dst_name(self, ns: NamespaceId) -> Option<&'t str> {
        self.mapping().dst_name(ns)
    }
}

impl fmt::Debug for MethodRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MethodRef({}.{}{})",
            self.class.src_name(),
            self.src_name(),
            self.src_desc()
        )
    }
}
