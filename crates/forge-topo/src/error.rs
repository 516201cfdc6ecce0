//! Error types for the topology core.

use thiserror::Error;

/// Result type alias for topology operations.
pub type TopoResult<T> = Result<T, TopoError>;

/// Errors that can occur while reading topology or design documents.
///
/// Serialization has no error path at all: structural problems in a design
/// become [`TopologyWarning`](crate::serializer::TopologyWarning) values, not
/// errors. Only syntactically broken input text lands here.
#[derive(Debug, Error)]
pub enum TopoError {
    /// Topology document text is not syntactically valid YAML.
    #[error("invalid topology yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Design document text is not a valid design JSON document.
    #[error("invalid design document: {0}")]
    Json(#[from] serde_json::Error),
}
