//! Per-kind fingerprint extraction.
//!
//! The matching algorithm in [`AncestryTreeBuilder`](crate::AncestryTreeBuilder)
//! is the same for every entity kind; only the way an entity is turned into
//! keys differs. Each kind gets a small strategy value implementing
//! [`KeyStrategy`].

use mc_mappings::{ClassRef, FieldRef, Member, MethodRef, NamespaceId, STATIC_INITIALIZER_NAME};
use serde::{Deserialize, Serialize};

use crate::{Fingerprint, FingerprintKey};

/// Fingerprint extraction for one entity kind.
pub trait KeyStrategy<E> {
    /// Whether the entity takes part in this tree at all.
    fn accepts(&self, _entity: E) -> bool {
        true
    }

    /// Keys of the entity in the given namespaces.
    fn fingerprint(&self, entity: E, namespaces: &[NamespaceId]) -> Fingerprint;

    /// Persistent integer index carried in `namespace`, if parseable.
    fn index(&self, entity: E, namespace: NamespaceId) -> Option<u64>;

    /// Cheap pre-check run before intersecting `candidate` with a node's
    /// cached fingerprint.
    fn compatible(&self, _candidate: &Fingerprint, _cached: &Fingerprint) -> bool {
        true
    }
}

fn parse_index(raw: Option<&str>) -> Option<u64> {
    raw?.trim().parse().ok()
}

/// Classes: the set of namespaced names.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassKeys;

impl<'t> KeyStrategy<ClassRef<'t>> for ClassKeys {
    fn fingerprint(&self, class: ClassRef<'t>, namespaces: &[NamespaceId]) -> Fingerprint {
        namespaces
            .iter()
            .filter_map(|&ns| class.dst_name(ns))
            .map(|name| FingerprintKey::Name(name.to_owned()))
            .collect()
    }

    fn index(&self, class: ClassRef<'t>, namespace: NamespaceId) -> Option<u64> {
        parse_index(class.dst_name(namespace))
    }
}

fn member_keys<'t, M: Member<'t>>(member: M, namespaces: &[NamespaceId]) -> Fingerprint {
    namespaces
        .iter()
        .filter_map(|&ns| {
            member
                .dst_name(ns)
                .map(|name| FingerprintKey::member(name, member.dst_desc(ns)))
        })
        .collect()
}

/// Fields: the set of (name, descriptor) pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldKeys;

impl<'t> KeyStrategy<FieldRef<'t>> for FieldKeys {
    fn fingerprint(&self, field: FieldRef<'t>, namespaces: &[NamespaceId]) -> Fingerprint {
        member_keys(field, namespaces)
    }

    fn index(&self, field: FieldRef<'t>, namespace: NamespaceId) -> Option<u64> {
        parse_index(field.dst_name(namespace))
    }
}

/// Which methods a method tree tracks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructorMode {
    /// Regular methods only.
    #[default]
    Exclude,
    /// Regular methods and constructors.
    Include,
    /// Constructors only.
    Only,
}

/// Methods: (name, descriptor) pairs; constructors by descriptor alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodKeys {
    pub mode: ConstructorMode,
}

impl MethodKeys {
    #[must_use]
    pub const fn new(mode: ConstructorMode) -> Self {
        Self { mode }
    }
}

impl<'t> KeyStrategy<MethodRef<'t>> for MethodKeys {
    fn accepts(&self, method: MethodRef<'t>) -> bool {
        match self.mode {
            ConstructorMode::Exclude => !method.is_constructor(),
            ConstructorMode::Include => true,
            ConstructorMode::Only => method.is_constructor(),
        }
    }

    fn fingerprint(&self, method: MethodRef<'t>, namespaces: &[NamespaceId]) -> Fingerprint {
        if method.is_constructor() {
            // Every namespace names constructors `<init>`; only the
            // descriptor tells overloads apart.
            return namespaces
                .first()
                .map(|&ns| FingerprintKey::Constructor {
                    desc: method.dst_desc(ns),
                })
                .into_iter()
                .collect();
        }

        if method.is_static_initializer() {
            return [FingerprintKey::member(
                STATIC_INITIALIZER_NAME,
                method.src_desc(),
            )]
            .into_iter()
            .collect();
        }

        member_keys(method, namespaces)
    }

    fn index(&self, method: MethodRef<'t>, namespace: NamespaceId) -> Option<u64> {
        parse_index(method.dst_name(namespace))
    }

    fn compatible(&self, candidate: &Fingerprint, cached: &Fingerprint) -> bool {
        self.mode != ConstructorMode::Include
            || candidate.is_constructor() == cached.is_constructor()
    }
}
