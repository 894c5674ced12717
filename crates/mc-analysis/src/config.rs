//! Analyzer configuration.

use mc_mappings::{ConfigError, MappingTree, NamespaceId, is_artificial};
use serde::{Deserialize, Serialize};

/// Namespace roles for the analyzer rules.
///
/// Names that a tree does not carry are ignored for that tree.
///
/// ```
/// use mc_analysis::AnalyzerConfig;
///
/// let config = AnalyzerConfig::from_json(r#"{ "exempt_namespaces": ["official"] }"#).unwrap();
/// assert!(config.inner_class_namespaces.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Namespaces in which unnamed nested classes get a name derived from
    /// their owner.
    pub inner_class_namespaces: Vec<String>,
    /// Namespaces never checked or rewritten by method rules.
    pub exempt_namespaces: Vec<String>,
    /// Namespaces whose shared names identify an override even when source
    /// names differ.
    pub cross_check_namespaces: Vec<String>,
}

impl AnalyzerConfig {
    /// Load a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_inner_class_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner_class_namespaces = namespaces.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_exempt_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exempt_namespaces = namespaces.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_cross_check_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cross_check_namespaces = namespaces.into_iter().map(Into::into).collect();
        self
    }
}

/// Config namespaces resolved against one tree, with their names.
#[derive(Debug, Clone, Default)]
pub(crate) struct TreeNamespaces<'t> {
    /// Mapped, non-exempt namespaces checked by method rules.
    pub checked: Vec<(NamespaceId, &'t str)>,
    pub inner_class: Vec<(NamespaceId, &'t str)>,
    pub cross_check: Vec<NamespaceId>,
}

impl<'t> TreeNamespaces<'t> {
    pub(crate) fn resolve(config: &AnalyzerConfig, tree: &'t MappingTree) -> Self {
        let lookup = |names: &[String]| -> Vec<(NamespaceId, &'t str)> {
            tree.dst_namespaces()
                .filter(|(_, ns)| names.iter().any(|name| name == *ns))
                .collect()
        };

        Self {
            checked: tree
                .dst_namespaces()
                .filter(|(_, ns)| !is_artificial(ns))
                .filter(|(_, ns)| !config.exempt_namespaces.iter().any(|name| name == *ns))
                .collect(),
            inner_class: lookup(&config.inner_class_namespaces),
            cross_check: lookup(&config.cross_check_namespaces)
                .into_iter()
                .map(|(id, _)| id)
                .collect(),
        }
    }
}
