//! Graph capability contracts.
//!
//! Each capability is a narrow, independently registerable behavior a graph
//! may or may not support. Callers discover capabilities through the
//! [`ComponentStack`](crate::components::ComponentStack) and must treat every
//! capability as optional. Vertex enumeration and traversal are pull-based
//! lazy streams: work happens only when the consumer asks for the next
//! element, which is what makes infinite dynamic graphs safe to traverse.

use crate::edge::Edge;
use crate::error::GraphError;
use crate::identity::Identity;
use crate::vertex::Vertex;
use async_trait::async_trait;
use futures::stream::{self, BoxStream};
use futures::{StreamExt, TryStreamExt};
use std::collections::HashSet;
use std::sync::Arc;

/// A lazy, pull-based sequence of vertices. May be infinite.
pub type VertexStream<'a> = BoxStream<'a, Result<Vertex, GraphError>>;

/// A lazy, pull-based sequence of edges.
pub type EdgeStream<'a> = BoxStream<'a, Result<Edge, GraphError>>;

/// Dynamic single-vertex lookup.
#[async_trait]
pub trait DynamicComponent: Send + Sync + 'static {
    /// Produce the single vertex with the given identity, or fail with
    /// [`GraphError::VertexNotFound`].
    async fn vertex(&self, id: &Identity) -> Result<Vertex, GraphError>;
}

/// Whole-graph enumeration. Only finite graphs register this capability.
pub trait EnumerableComponent: Send + Sync + 'static {
    /// Produce a lazy sequence of every vertex in the graph.
    fn vertices(self: Arc<Self>) -> VertexStream<'static>;

    /// Produce every edge in the graph by deduplicating the union of each
    /// vertex's incident edges. Providers with a direct edge index may
    /// override this.
    fn edges(self: Arc<Self>) -> EdgeStream<'static> {
        let mut seen: HashSet<Edge> = HashSet::new();
        Box::pin(
            self.vertices()
                .map_ok(|vertex| stream::iter(vertex.edges.into_iter().map(Ok::<Edge, GraphError>)))
                .try_flatten()
                .filter_map(move |item| {
                    let keep = match &item {
                        Ok(edge) => seen.insert(edge.clone()),
                        Err(_) => true,
                    };
                    futures::future::ready(if keep { Some(item) } else { None })
                }),
        )
    }
}

/// Root-vertex discovery for graphs with a defined entry point.
#[async_trait]
pub trait RootedComponent: Send + Sync + 'static {
    /// Produce the identities of the root vertices.
    async fn roots(&self) -> Result<Vec<Identity>, GraphError>;
}

/// Direct in-edge traversal: the parent vertices of a given vertex.
pub trait DynamicInComponent: Send + Sync + 'static {
    /// Produce the vertices with an edge into the identified vertex.
    fn parents(self: Arc<Self>, id: &Identity) -> VertexStream<'static>;
}

/// Direct out-edge traversal: the child vertices of a given vertex.
pub trait DynamicOutComponent: Send + Sync + 'static {
    /// Produce the vertices the identified vertex has an edge to.
    fn children(self: Arc<Self>, id: &Identity) -> VertexStream<'static>;
}
