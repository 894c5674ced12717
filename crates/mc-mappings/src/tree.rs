//! In-memory mapping tree for a single release.

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::{
    ClassRef, INTERFACES_NAMESPACE, MODIFIERS_NAMESPACE, MappingError, MappingResult, NamespaceId,
    SUPERCLASS_NAMESPACE, descriptor, is_artificial,
};

/// Write `name` into the slot for `ns`, growing the slot list if needed.
fn set_slot(names: &mut Vec<Option<String>>, ns: NamespaceId, name: Option<String>) {
    let index = ns.index();
    if names.len() <= index {
        names.resize(index + 1, None);
    }
    names[index] = name;
}

fn get_slot(names: &[Option<String>], ns: NamespaceId) -> Option<&str> {
    names.get(ns.index()).and_then(Option::as_deref)
}

/// Mapping data for one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMapping {
    src_name: String,
    dst_names: Vec<Option<String>>,
    fields: Vec<FieldMapping>,
    methods: Vec<MethodMapping>,
}

/// Mapping data for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    src_name: String,
    src_desc: String,
    dst_names: Vec<Option<String>>,
}

/// Mapping data for one method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodMapping {
    src_name: String,
    src_desc: String,
    dst_names: Vec<Option<String>>,
}

macro_rules! member_mapping {
    ($ty:ident) => {
        impl $ty {
            fn new(src_name: String, src_desc: String, width: usize) -> Self {
                Self {
                    src_name,
                    src_desc,
                    dst_names: vec![None; width],
                }
            }

            #[must_use]
            pub fn src_name(&self) -> &str {
                &self.src_name
            }

            #[must_use]
            pub fn src_desc(&self) -> &str {
                &self.src_desc
            }

            #[must_use]
            pub fn dst_name(&self, ns: NamespaceId) -> Option<&str> {
                get_slot(&self.dst_names, ns)
            }

            /// Set the name in a destination namespace.
            pub fn set_name(&mut self, ns: NamespaceId, name: impl Into<String>) -> &mut Self {
                set_slot(&mut self.dst_names, ns, Some(name.into()));
                self
            }

            /// Remove the name in a destination namespace.
            pub fn clear_name(&mut self, ns: NamespaceId) -> &mut Self {
                set_slot(&mut self.dst_names, ns, None);
                self
            }

            fn matches(&self, name: &str, desc: &str) -> bool {
                self.src_name == name && self.src_desc == desc
            }
        }
    };
}

member_mapping!(FieldMapping);
member_mapping!(MethodMapping);

impl ClassMapping {
    fn new(src_name: String, width: usize) -> Self {
        Self {
            src_name,
            dst_names: vec![None; width],
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    #[must_use]
    pub fn src_name(&self) -> &str {
        &self.src_name
    }

    #[must_use]
    pub fn dst_name(&self, ns: NamespaceId) -> Option<&str> {
        get_slot(&self.dst_names, ns)
    }

    /// Set the name in a destination namespace.
    pub fn set_name(&mut self, ns: NamespaceId, name: impl Into<String>) -> &mut Self {
        set_slot(&mut self.dst_names, ns, Some(name.into()));
        self
    }

    /// Remove the name in a destination namespace.
    pub fn clear_name(&mut self, ns: NamespaceId) -> &mut Self {
        set_slot(&mut self.dst_names, ns, None);
        self
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldMapping] {
        &self.fields
    }

    #[must_use]
    pub fn methods(&self) -> &[MethodMapping] {
        &self.methods
    }

    /// Get or create a field.
    pub fn add_field(
        &mut self,
        name: impl Into<String>,
        desc: impl Into<String>,
    ) -> &mut FieldMapping {
        let (name, desc) = (name.into(), desc.into());
        let index = match self.fields.iter().position(|f| f.matches(&name, &desc)) {
            Some(index) => index,
            None => {
                let width = self.dst_names.len();
                self.fields.push(FieldMapping::new(name, desc, width));
                self.fields.len() - 1
            }
        };
        &mut self.fields[index]
    }

    /// Get or create a method.
    pub fn add_method(
        &mut self,
        name: impl Into<String>,
        desc: impl Into<String>,
    ) -> &mut MethodMapping {
        let (name, desc) = (name.into(), desc.into());
        let index = match self.methods.iter().position(|m| m.matches(&name, &desc)) {
            Some(index) => index,
            None => {
                let width = self.dst_names.len();
                self.methods.push(MethodMapping::new(name, desc, width));
                self.methods.len() - 1
            }
        };
        &mut self.methods[index]
    }

    pub fn field_mut(&mut self, name: &str, desc: &str) -> Option<&mut FieldMapping> {
        self.fields.iter_mut().find(|f| f.matches(name, desc))
    }

    pub fn method_mut(&mut self, name: &str, desc: &str) -> Option<&mut MethodMapping> {
        self.methods.iter_mut().find(|m| m.matches(name, desc))
    }

    pub fn remove_field(&mut self, name: &str, desc: &str) -> Option<FieldMapping> {
        let index = self.fields.iter().position(|f| f.matches(name, desc))?;
        Some(self.fields.remove(index))
    }

    pub fn remove_method(&mut self, name: &str, desc: &str) -> Option<MethodMapping> {
        let index = self.methods.iter().position(|m| m.matches(name, desc))?;
        Some(self.methods.remove(index))
    }
}

/// Structural namespaces resolved once per tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Artificial {
    pub modifiers: Option<NamespaceId>,
    pub superclass: Option<NamespaceId>,
    pub interfaces: Option<NamespaceId>,
}

/// All mapping data of one release.
///
/// Classes are stored in insertion order and addressed by source name.
#[derive(Debug, Clone, Default)]
pub struct MappingTree {
    src_namespace: String,
    dst_namespaces: Vec<String>,
    artificial: Artificial,
    classes: Vec<ClassMapping>,
    /// Source name → index into `classes`.
    class_index: FxHashMap<String, usize>,
}

impl MappingTree {
    /// Create an empty tree with the given namespaces.
    pub fn new<I, S>(src_namespace: impl Into<String>, dst_namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dst_namespaces: Vec<String> = dst_namespaces.into_iter().map(Into::into).collect();
        let find = |name: &str| {
            dst_namespaces
                .iter()
                .position(|ns| ns == name)
                .map(|index| NamespaceId::from_raw(index as u16))
        };
        let artificial = Artificial {
            modifiers: find(MODIFIERS_NAMESPACE),
            superclass: find(SUPERCLASS_NAMESPACE),
            interfaces: find(INTERFACES_NAMESPACE),
        };

        Self {
            src_namespace: src_namespace.into(),
            dst_namespaces,
            artificial,
            classes: Vec::new(),
            class_index: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn src_namespace(&self) -> &str {
        &self.src_namespace
    }

    /// All destination namespaces with their ids.
    pub fn dst_namespaces(&self) -> impl Iterator<Item = (NamespaceId, &str)> {
        self.dst_namespaces
            .iter()
            .enumerate()
            .map(|(index, name)| (NamespaceId::from_raw(index as u16), name.as_str()))
    }

    /// Destination namespaces holding real names (no artificial ones).
    pub fn mapped_namespaces(&self) -> impl Iterator<Item = NamespaceId> + '_ {
        self.dst_namespaces()
            .filter(|(_, name)| !is_artificial(name))
            .map(|(id, _)| id)
    }

    /// Resolve a destination namespace by name.
    #[must_use]
    pub fn namespace_id(&self, name: &str) -> Option<NamespaceId> {
        self.dst_namespaces()
            .find(|(_, ns)| *ns == name)
            .map(|(id, _)| id)
    }

    /// Resolve a destination namespace by name, failing if it is missing.
    pub fn require_namespace(&self, name: &str) -> MappingResult<NamespaceId> {
        self.namespace_id(name)
            .ok_or_else(|| MappingError::UnknownNamespace(name.to_owned()))
    }

    #[must_use]
    pub fn namespace_name(&self, ns: NamespaceId) -> Option<&str> {
        self.dst_namespaces.get(ns.index()).map(String::as_str)
    }

    pub(crate) const fn artificial(&self) -> Artificial {
        self.artificial
    }

    #[must_use]
    pub fn modifiers_namespace(&self) -> Option<NamespaceId> {
        self.artificial.modifiers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Get or create a class.
    pub fn add_class(&mut self, src_name: impl Into<String>) -> &mut ClassMapping {
        let src_name = src_name.into();
        let index = match self.class_index.get(&src_name) {
            Some(&index) => index,
            None => {
                let index = self.classes.len();
                self.class_index.insert(src_name.clone(), index);
                self.classes
                    .push(ClassMapping::new(src_name, self.dst_namespaces.len()));
                index
            }
        };
        &mut self.classes[index]
    }

    /// Look up a class by source name.
    #[must_use]
    pub fn class(&self, src_name: &str) -> Option<ClassRef<'_>> {
        self.class_index
            .get(src_name)
            .map(|&index| ClassRef::new(self, index))
    }

    pub fn class_mut(&mut self, src_name: &str) -> Option<&mut ClassMapping> {
        let index = *self.class_index.get(src_name)?;
        Some(&mut self.classes[index])
    }

    /// All classes in insertion order (until the first removal).
    pub fn classes(&self) -> impl ExactSizeIterator<Item = ClassRef<'_>> {
        (0..self.classes.len()).map(|index| ClassRef::new(self, index))
    }

    pub(crate) fn class_at(&self, index: usize) -> &ClassMapping {
        &self.classes[index]
    }

    /// Remove a class and all of its members.
    pub fn remove_class(&mut self, src_name: &str) -> Option<ClassMapping> {
        let index = self.class_index.remove(src_name)?;
        let removed = self.classes.swap_remove(index);
        if let Some(moved) = self.classes.get(index) {
            self.class_index.insert(moved.src_name.clone(), index);
        }
        trace!(
            "removed class {src_name} with {} fields, {} methods",
            removed.fields.len(),
            removed.methods.len()
        );
        Some(removed)
    }

    /// Name of a class in a namespace.
    #[must_use]
    pub fn map_class_name(&self, src_name: &str, ns: NamespaceId) -> Option<&str> {
        let index = *self.class_index.get(src_name)?;
        self.classes[index].dst_name(ns)
    }

    /// Map a source descriptor into a namespace.
    #[must_use]
    pub fn map_desc(&self, desc: &str, ns: NamespaceId) -> String {
        descriptor::map(desc, |class| self.map_class_name(class, ns))
    }
}
