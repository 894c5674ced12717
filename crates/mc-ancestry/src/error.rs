//! Ancestry error types.

use mc_mappings::{MappingError, Version};
use thiserror::Error;

/// Structural and precondition errors of ancestry building and queries.
#[derive(Debug, Error)]
pub enum AncestryError {
    /// Namespace resolution failed.
    #[error("mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// Versions must reach a builder in strictly ascending release order.
    #[error("version {version} is not after {previous}")]
    VersionOutOfOrder { version: Version, previous: Version },

    /// Node never cached a fingerprint (index-only node).
    #[error("node has no cached fingerprint (index {index:?})")]
    NoFingerprint { index: Option<u64> },

    /// A version referenced by a node is unknown to the owning tree.
    #[error("version not tracked by this tree: {0}")]
    UnknownVersion(Version),
}

/// Result type for ancestry operations.
pub type AncestryResult<T> = Result<T, AncestryError>;
