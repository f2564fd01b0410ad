use thiserror::Error;
use trellis_graph::GraphError;

/// Error type for operation execution and discriminant serialization.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    /// A discriminant tag did not resolve to a registered operation type
    #[error("Unknown operation discriminant: {0}")]
    UnknownDiscriminant(String),

    /// A required input field was absent from the context
    #[error("Missing operation input: {0}")]
    MissingInput(String),

    /// An operation was configured with values it cannot run with
    #[error("Invalid operation configuration: {0}")]
    InvalidConfiguration(String),

    /// An underlying graph operation failed
    #[error("Graph error: {0}")]
    Graph(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for OperationError {
    fn from(err: serde_json::Error) -> Self {
        OperationError::SerializationError(err.to_string())
    }
}

impl From<GraphError> for OperationError {
    fn from(err: GraphError) -> Self {
        OperationError::Graph(err.to_string())
    }
}

impl From<String> for OperationError {
    fn from(err: String) -> Self {
        OperationError::Other(err)
    }
}

impl From<&str> for OperationError {
    fn from(err: &str) -> Self {
        OperationError::Other(err.to_string())
    }
}
