//! Mapping error types.

use thiserror::Error;

use crate::Version;

/// Errors raised by mapping tree operations.
///
/// These signal caller mistakes (unknown versions, stale element paths),
/// never data-quality conditions of the mappings themselves.
#[derive(Debug, Error)]
pub enum MappingError {
    /// Version is not part of the resolved set of trees.
    #[error("unknown version: {0}")]
    UnknownVersion(Version),

    /// Namespace name is not present in the tree.
    #[error("unknown namespace: {0}")]
    UnknownNamespace(String),

    /// Class with the given source name does not exist.
    #[error("class not found: {0}")]
    ClassNotFound(String),

    /// Field with the given source name and descriptor does not exist.
    #[error("field not found: {owner}.{name}:{desc}")]
    FieldNotFound {
        owner: String,
        name: String,
        desc: String,
    },

    /// Method with the given source name and descriptor does not exist.
    #[error("method not found: {owner}.{name}{desc}")]
    MethodNotFound {
        owner: String,
        name: String,
        desc: String,
    },
}

/// Result type for mapping operations.
pub type MappingResult<T> = Result<T, MappingError>;

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON deserialization failed.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}
