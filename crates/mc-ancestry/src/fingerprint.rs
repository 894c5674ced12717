//! Fingerprints: the namespaced names used to test cross-version identity.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// One namespaced name of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FingerprintKey {
    /// A class name.
    Name(String),
    /// A field or method name paired with its mapped descriptor.
    Member { name: String, desc: String },
    /// A constructor, identified by its descriptor mapped into the first
    /// allowed namespace. One key per constructor.
    Constructor { desc: String },
}

impl FingerprintKey {
    /// Member key from a name and descriptor.
    pub fn member(name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self::Member {
            name: name.into(),
            desc: desc.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Name(name) | Self::Member { name, .. } => Some(name),
            Self::Constructor { .. } => None,
        }
    }

    #[must_use]
    pub fn desc(&self) -> Option<&str> {
        match self {
            Self::Name(_) => None,
            Self::Member { desc, .. } | Self::Constructor { desc } => Some(desc),
        }
    }
}

/// The set of keys an entity shows in one version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fingerprint {
    keys: FxHashSet<FingerprintKey>,
}

impl Fingerprint {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: FingerprintKey) -> bool {
        self.keys.insert(key)
    }

    #[must_use]
    pub fn contains(&self, key: &FingerprintKey) -> bool {
        self.keys.contains(key)
    }

    /// Whether the two fingerprints share at least one key.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.keys.iter().any(|key| large.contains(key))
    }

    /// Whether this fingerprint describes a constructor.
    ///
    /// Constructor fingerprints never mix with other keys, so checking one
    /// key is enough.
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.keys
            .iter()
            .next()
            .is_some_and(|key| matches!(key, FingerprintKey::Constructor { .. }))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FingerprintKey> {
        self.keys.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<FingerprintKey> for Fingerprint {
    fn from_iter<I: IntoIterator<Item = FingerprintKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

impl Extend<FingerprintKey> for Fingerprint {
    fn extend<I: IntoIterator<Item = FingerprintKey>>(&mut self, iter: I) {
        self.keys.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Fingerprint {
    type Item = &'a FingerprintKey;
    type IntoIter = std::collections::hash_set::Iter<'a, FingerprintKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> Fingerprint {
        names
            .iter()
            .map(|name| FingerprintKey::Name((*name).to_owned()))
            .collect()
    }

    #[test]
    fn test_intersects() {
        assert!(names(&["a", "Foo"]).intersects(&names(&["b", "Foo"])));
        assert!(!names(&["a", "Foo"]).intersects(&names(&["b", "Bar"])));
        assert!(!names(&[]).intersects(&names(&["b"])));
    }

    #[test]
    fn test_member_keys_include_descriptor() {
        let a: Fingerprint = [FingerprintKey::member("tick", "()V")].into_iter().collect();
        let b: Fingerprint = [FingerprintKey::member("tick", "(I)V")].into_iter().collect();
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_is_constructor() {
        let ctor: Fingerprint = [FingerprintKey::Constructor { desc: "()V".into() }]
            .into_iter()
            .collect();
        assert!(ctor.is_constructor());
        assert!(!names(&["a"]).is_constructor());
        assert!(!Fingerprint::new().is_constructor());
    }
}
