//! Ancestry building configuration.

use mc_mappings::ConfigError;
use serde::{Deserialize, Serialize};

/// Which namespaces take part in matching.
///
/// ```
/// use mc_ancestry::AncestryConfig;
///
/// let config = AncestryConfig::from_json(r#"{ "namespaces": ["intermediary", "named"] }"#).unwrap();
/// assert_eq!(config.index_namespace, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AncestryConfig {
    /// Explicit namespace subset. `None` uses every mapped namespace of each
    /// version.
    pub namespaces: Option<Vec<String>>,
    /// Namespace holding persistent integer ids that bypass fingerprint
    /// matching.
    pub index_namespace: Option<String>,
}

impl AncestryConfig {
    /// Load a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespaces = Some(namespaces.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_index_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.index_namespace = Some(namespace.into());
        self
    }
}
