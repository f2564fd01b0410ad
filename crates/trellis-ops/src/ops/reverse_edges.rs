use crate::context::OperationContext;
use crate::error::OperationError;
use crate::operation::TypedOperation;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use trellis_graph::MemoryGraph;

/// Flips the direction of every edge in a finite graph. Vertices are never
/// mutated; the output graph is a fresh snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReverseEdgesOperation {}

/// The input of [`ReverseEdgesOperation`].
#[derive(Debug, Deserialize)]
pub struct ReverseEdgesInput {
    /// The graph whose edges to reverse
    pub graph: MemoryGraph,
}

/// The output of [`ReverseEdgesOperation`].
#[derive(Debug, Serialize)]
pub struct ReverseEdgesOutput {
    /// The reversed graph
    pub graph: MemoryGraph,
}

#[async_trait]
impl TypedOperation for ReverseEdgesOperation {
    type Input = ReverseEdgesInput;
    type Output = ReverseEdgesOutput;
    const DISCRIMINANT: &'static str = "reverseEdges";

    async fn run(
        &self,
        input: ReverseEdgesInput,
        _context: &OperationContext,
    ) -> Result<ReverseEdgesOutput, OperationError> {
        let graph = input.graph.map_vertices(|vertex| vertex.with_edges_reversed());
        Ok(ReverseEdgesOutput { graph })
    }
}
