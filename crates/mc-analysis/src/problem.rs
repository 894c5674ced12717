//! Problems found by the analyzer and their deferred resolutions.
//!
//! Problems address elements by source names, never by views, so they
//! outlive the borrow of the analyzed tree and can be applied to it later.

use std::fmt;

use mc_mappings::{
    ClassMapping, ClassRef, FieldRef, MappingError, MappingResult, MappingTree, Member, MethodRef,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Kinds of naming defects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProblemKind {
    /// No parseable modifier value; the element is absent from the jar.
    NonExistentMapping,
    /// Compiler-generated element.
    Synthetic,
    /// Nested class without a name while one of its owners has one.
    InnerClassOwnerNotMapped,
    /// Override named differently from the method it overrides.
    InheritanceError,
    /// Constructor, static initializer or implicit enum method renamed.
    SpecialMethodNotMapped,
}

impl ProblemKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NonExistentMapping => "NON_EXISTENT_MAPPING",
            Self::Synthetic => "SYNTHETIC",
            Self::InnerClassOwnerNotMapped => "INNER_CLASS_OWNER_NOT_MAPPED",
            Self::InheritanceError => "INHERITANCE_ERROR",
            Self::SpecialMethodNotMapped => "SPECIAL_METHOD_NOT_MAPPED",
        }
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An element of a tree, addressed by source names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementPath {
    Class {
        name: String,
    },
    Field {
        owner: String,
        name: String,
        desc: String,
    },
    Method {
        owner: String,
        name: String,
        desc: String,
    },
}

impl ElementPath {
    #[must_use]
    pub fn class(class: ClassRef<'_>) -> Self {
        Self::Class {
            name: class.src_name().to_owned(),
        }
    }

    #[must_use]
    pub fn field(field: FieldRef<'_>) -> Self {
        Self::Field {
            owner: field.owner().src_name().to_owned(),
            name: field.src_name().to_owned(),
            desc: field.src_desc().to_owned(),
        }
    }

    #[must_use]
    pub fn method(method: MethodRef<'_>) -> Self {
        Self::Method {
            owner: method.owner().src_name().to_owned(),
            name: method.src_name().to_owned(),
            desc: method.src_desc().to_owned(),
        }
    }

    /// Source name of the class holding this element.
    #[must_use]
    pub fn class_name(&self) -> &str {
        match self {
            Self::Class { name } => name,
            Self::Field { owner, .. } | Self::Method { owner, .. } => owner,
        }
    }

    /// Whether the element still exists in `tree`.
    #[must_use]
    pub fn exists_in(&self, tree: &MappingTree) -> bool {
        let Some(class) = tree.class(self.class_name()) else {
            return false;
        };
        match self {
            Self::Class { .. } => true,
            Self::Field { name, desc, .. } => class.field(name, desc).is_some(),
            Self::Method { name, desc, .. } => class.method(name, desc).is_some(),
        }
    }

    fn remove(&self, tree: &mut MappingTree) -> MappingResult<()> {
        match self {
            Self::Class { name } => tree
                .remove_class(name)
                .map(drop)
                .ok_or_else(|| MappingError::ClassNotFound(name.clone())),
            Self::Field { owner, name, desc } => class_mut(tree, owner)?
                .remove_field(name, desc)
                .map(drop)
                .ok_or_else(|| self.not_found()),
            Self::Method { owner, name, desc } => class_mut(tree, owner)?
                .remove_method(name, desc)
                .map(drop)
                .ok_or_else(|| self.not_found()),
        }
    }

    fn rename(&self, tree: &mut MappingTree, namespace: &str, new_name: &str) -> MappingResult<()> {
        let ns = tree.require_namespace(namespace)?;
        match self {
            Self::Class { name } => {
                class_mut(tree, name)?.set_name(ns, new_name);
            }
            Self::Field { owner, name, desc } => {
                class_mut(tree, owner)?
                    .field_mut(name, desc)
                    .ok_or_else(|| self.not_found())?
                    .set_name(ns, new_name);
            }
            Self::Method { owner, name, desc } => {
                class_mut(tree, owner)?
                    .method_mut(name, desc)
                    .ok_or_else(|| self.not_found())?
                    .set_name(ns, new_name);
            }
        }
        Ok(())
    }

    fn not_found(&self) -> MappingError {
        match self.clone() {
            Self::Class { name } => MappingError::ClassNotFound(name),
            Self::Field { owner, name, desc } => MappingError::FieldNotFound { owner, name, desc },
            Self::Method { owner, name, desc } => MappingError::MethodNotFound { owner, name, desc },
        }
    }
}

fn class_mut<'a>(tree: &'a mut MappingTree, name: &str) -> MappingResult<&'a mut ClassMapping> {
    tree.class_mut(name)
        .ok_or_else(|| MappingError::ClassNotFound(name.to_owned()))
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class { name } => write!(f, "{name}"),
            Self::Field { owner, name, desc } => write!(f, "{owner}.{name}:{desc}"),
            Self::Method { owner, name, desc } => write!(f, "{owner}.{name}{desc}"),
        }
    }
}

/// A correction, applied only on request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Delete the element (and, for classes, all of its members).
    Remove(ElementPath),
    /// Set the element's name in one namespace.
    Rename {
        element: ElementPath,
        namespace: String,
        name: String,
    },
}

impl Resolution {
    /// Apply the resolution to `tree`.
    ///
    /// Fails if the element or namespace no longer exists.
    pub fn apply(&self, tree: &mut MappingTree) -> MappingResult<()> {
        match self {
            Self::Remove(element) => element.remove(tree),
            Self::Rename {
                element,
                namespace,
                name,
            } => element.rename(tree, namespace, name),
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remove(_) => f.write_str("remove"),
            Self::Rename {
                namespace, name, ..
            } => write!(f, "rename to {name} in {namespace}"),
        }
    }
}

/// One finding of the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub kind: ProblemKind,
    pub element: ElementPath,
    pub message: String,
    /// `None` when the analyzer found nothing to correct with.
    pub resolution: Option<Resolution>,
}

impl Problem {
    pub(crate) fn remove(kind: ProblemKind, element: ElementPath, message: String) -> Self {
        Self {
            kind,
            resolution: Some(Resolution::Remove(element.clone())),
            element,
            message,
        }
    }

    pub(crate) fn rename(
        kind: ProblemKind,
        element: ElementPath,
        namespace: &str,
        name: &str,
        message: String,
    ) -> Self {
        Self {
            kind,
            resolution: Some(Resolution::Rename {
                element: element.clone(),
                namespace: namespace.to_owned(),
                name: name.to_owned(),
            }),
            element,
            message,
        }
    }

    pub(crate) const fn unresolved(kind: ProblemKind, element: ElementPath, message: String) -> Self {
        Self {
            kind,
            element,
            message,
            resolution: None,
        }
    }

    #[must_use]
    pub const fn is_resolvable(&self) -> bool {
        self.resolution.is_some()
    }

    /// Apply this problem's resolution, if any.
    ///
    /// Returns whether anything was applied.
    pub fn apply(&self, tree: &mut MappingTree) -> MappingResult<bool> {
        let Some(resolution) = &self.resolution else {
            return Ok(false);
        };
        resolution.apply(tree)?;
        trace!("applied {} to {}: {resolution}", self.kind, self.element);
        Ok(true)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.kind, self.element, self.message)?;
        if let Some(resolution) = &self.resolution {
            write!(f, " ({resolution})")?;
        }
        Ok(())
    }
}

/// Apply every resolution in order, stopping at the first failure.
///
/// Returns the number of resolutions applied.
pub fn apply_all<'p>(
    problems: impl IntoIterator<Item = &'p Problem>,
    tree: &mut MappingTree,
) -> MappingResult<usize> {
    let mut applied = 0;
    for problem in problems {
        if problem.apply(tree)? {
            applied += 1;
        }
    }
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> MappingTree {
        let mut tree = MappingTree::new("official", ["named"]);
        let named = tree.namespace_id("named").unwrap();
        let class = tree.add_class("a");
        class.set_name(named, "Entity");
        class.add_field("b", "I").set_name(named, "age");
        class.add_method("c", "(La;)V").set_name(named, "copy");
        tree
    }

    fn field() -> ElementPath {
        ElementPath::Field {
            owner: "a".into(),
            name: "b".into(),
            desc: "I".into(),
        }
    }

    #[test]
    fn test_display() {
        let method = ElementPath::Method {
            owner: "a".into(),
            name: "c".into(),
            desc: "(La;)V".into(),
        };
        assert_eq!(field().to_string(), "a.b:I");
        assert_eq!(method.to_string(), "a.c(La;)V");
        assert_eq!(ProblemKind::InheritanceError.to_string(), "INHERITANCE_ERROR");
    }

    #[test]
    fn test_paths_from_views() {
        let tree = tree();
        let class = tree.class("a").unwrap();
        assert_eq!(ElementPath::field(class.field("b", "I").unwrap()), field());
        assert!(ElementPath::method(class.method("c", "(La;)V").unwrap()).exists_in(&tree));
        assert!(!ElementPath::Class { name: "z".into() }.exists_in(&tree));
    }

    #[test]
    fn test_remove_and_rename() {
        let mut tree = tree();
        let named = tree.namespace_id("named").unwrap();

        let rename = Resolution::Rename {
            element: field(),
            namespace: "named".into(),
            name: "years".into(),
        };
        rename.apply(&mut tree).unwrap();
        let class = tree.class("a").unwrap();
        assert_eq!(class.field("b", "I").unwrap().dst_name(named), Some("years"));

        Resolution::Remove(field()).apply(&mut tree).unwrap();
        assert!(!field().exists_in(&tree));
        assert!(matches!(
            Resolution::Remove(field()).apply(&mut tree),
            Err(MappingError::FieldNotFound { .. })
        ));
    }

    #[test]
    fn test_rename_unknown_namespace_fails() {
        let mut tree = tree();
        let rename = Resolution::Rename {
            element: field(),
            namespace: "yarn".into(),
            name: "x".into(),
        };
        assert!(matches!(
            rename.apply(&mut tree),
            Err(MappingError::UnknownNamespace(ns)) if ns == "yarn"
        ));
    }

    #[test]
    fn test_apply_all_counts_resolvable() {
        let mut tree = tree();
        let class = ElementPath::Class { name: "a".into() };
        let problems = [
            Problem::unresolved(ProblemKind::InnerClassOwnerNotMapped, class.clone(), String::new()),
            Problem::remove(ProblemKind::Synthetic, class, String::new()),
        ];

        assert_eq!(apply_all(&problems, &mut tree).unwrap(), 1);
        assert!(tree.class("a").is_none());
        assert!(apply_all(&problems, &mut tree).is_err());
    }

    #[test]
    fn test_problem_json() {
        let problem = Problem::remove(
            ProblemKind::NonExistentMapping,
            field(),
            "no modifiers".into(),
        );
        let json = serde_json::to_value(&problem).unwrap();
        assert_eq!(json["kind"], "NON_EXISTENT_MAPPING");
        assert_eq!(json["element"]["type"], "field");
        assert_eq!(json["resolution"]["remove"]["owner"], "a");

        let back: Problem = serde_json::from_value(json).unwrap();
        assert_eq!(back, problem);
    }
}
