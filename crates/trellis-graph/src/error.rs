use thiserror::Error;

/// Error type for graph data and capability operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A vertex could not be found by its identity
    #[error("Vertex not found: {0}")]
    VertexNotFound(String),

    /// An identity could not be viewed as the requested type
    #[error("Identity conversion error: {0}")]
    IdentityConversion(String),

    /// A capability the operation requires is not registered on the graph
    #[error("Capability missing: {0}")]
    CapabilityMissing(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::SerializationError(err.to_string())
    }
}

impl From<String> for GraphError {
    fn from(err: String) -> Self {
        GraphError::Other(err)
    }
}

impl From<&str> for GraphError {
    fn from(err: &str) -> Self {
        GraphError::Other(err.to_string())
    }
}
