//! A finite, fully materialized graph held in memory.
//!
//! [`MemoryGraph`] is the snapshot type the workflow engine operates on:
//! every vertex is present up front, keyed and ordered by identity, so it
//! supports the full capability set including enumeration.

use crate::capabilities::{
    DynamicComponent, DynamicInComponent, DynamicOutComponent, EnumerableComponent,
    RootedComponent, VertexStream,
};
use crate::error::GraphError;
use crate::identity::Identity;
use crate::vertex::Vertex;
use async_trait::async_trait;
use futures::stream;
use futures::TryStreamExt;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::ops::Bound;
use std::sync::Arc;

/// A finite graph snapshot: vertices keyed by identity plus root markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MemoryGraphRepr", into = "MemoryGraphRepr")]
pub struct MemoryGraph {
    id: Identity,
    directed: bool,
    roots: BTreeSet<Identity>,
    vertices: BTreeMap<Identity, Vertex>,
}

/// The serialized shape of a [`MemoryGraph`]: flat vertex list, roots as a
/// plain sequence.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MemoryGraphRepr {
    id: Identity,
    directed: bool,
    #[serde(default)]
    roots: Vec<Identity>,
    #[serde(default)]
    vertices: Vec<Vertex>,
}

impl From<MemoryGraphRepr> for MemoryGraph {
    fn from(repr: MemoryGraphRepr) -> Self {
        let mut graph = MemoryGraph::new(repr.id, repr.directed);
        for vertex in repr.vertices {
            graph.insert(vertex);
        }
        for root in repr.roots {
            graph.mark_root(root);
        }
        graph
    }
}

impl From<MemoryGraph> for MemoryGraphRepr {
    fn from(graph: MemoryGraph) -> Self {
        MemoryGraphRepr {
            id: graph.id,
            directed: graph.directed,
            roots: graph.roots.into_iter().collect(),
            vertices: graph.vertices.into_values().collect(),
        }
    }
}

impl MemoryGraph {
    /// Create an empty graph.
    pub fn new(id: impl Into<Identity>, directed: bool) -> Self {
        Self {
            id: id.into(),
            directed,
            roots: BTreeSet::new(),
            vertices: BTreeMap::new(),
        }
    }

    /// The identity of the graph.
    #[inline]
    pub fn id(&self) -> &Identity {
        &self.id
    }

    /// Whether edges are directed.
    #[inline]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// The number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the graph has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Insert a vertex, replacing any existing vertex with the same
    /// identity. Returns the replaced vertex, if any.
    pub fn insert(&mut self, vertex: Vertex) -> Option<Vertex> {
        self.vertices.insert(vertex.id.clone(), vertex)
    }

    /// Remove a vertex and its root marker.
    pub fn remove(&mut self, id: &Identity) -> Option<Vertex> {
        self.roots.remove(id);
        self.vertices.remove(id)
    }

    /// Mark an identity as a root vertex.
    pub fn mark_root(&mut self, id: impl Into<Identity>) -> &mut Self {
        self.roots.insert(id.into());
        self
    }

    /// Look up a vertex by identity.
    pub fn get(&self, id: &Identity) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    /// Iterate the vertices in identity order.
    pub fn iter(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    /// The root identities in identity order.
    pub fn root_ids(&self) -> impl Iterator<Item = &Identity> {
        self.roots.iter()
    }

    /// Replace every vertex through a transformation, preserving the graph
    /// identity, direction, and root markers.
    pub fn map_vertices(&self, transform: impl Fn(&Vertex) -> Vertex) -> MemoryGraph {
        let mut derived = MemoryGraph::new(self.id.clone(), self.directed);
        derived.roots = self.roots.clone();
        for vertex in self.vertices.values() {
            derived.insert(transform(vertex));
        }
        derived
    }

    /// Materialize a snapshot by draining an enumeration stream. Fails on
    /// the first vertex the underlying provider fails to produce.
    pub async fn from_vertices(
        id: impl Into<Identity>,
        directed: bool,
        vertices: VertexStream<'_>,
    ) -> Result<MemoryGraph, GraphError> {
        let mut graph = MemoryGraph::new(id, directed);
        let collected: Vec<Vertex> = vertices.try_collect().await?;
        for vertex in collected {
            graph.insert(vertex);
        }
        Ok(graph)
    }

    fn resolve(&self, id: &Identity) -> Result<Vertex, GraphError> {
        self.vertices
            .get(id)
            .cloned()
            .ok_or_else(|| GraphError::VertexNotFound(id.to_string()))
    }

    fn neighbor_stream(
        self: Arc<Self>,
        id: &Identity,
        parents: bool,
    ) -> VertexStream<'static> {
        // Matches the derived fallback exactly: a missing origin or a
        // dangling neighbor is an error item, not a silent skip.
        let origin = self.resolve(id);
        let mut pending: VecDeque<Identity> = match &origin {
            Ok(vertex) => {
                if parents {
                    vertex.parent_ids().cloned().collect()
                } else {
                    vertex.child_ids().cloned().collect()
                }
            }
            Err(_) => VecDeque::new(),
        };
        let mut failed = origin.err();
        Box::pin(stream::unfold(self, move |graph| {
            let item = if let Some(error) = failed.take() {
                Some(Err(error))
            } else {
                pending.pop_front().map(|next| graph.resolve(&next))
            };
            futures::future::ready(item.map(|item| (item, graph)))
        }))
    }
}

#[async_trait]
impl DynamicComponent for MemoryGraph {
    async fn vertex(&self, id: &Identity) -> Result<Vertex, GraphError> {
        self.resolve(id)
    }
}

impl EnumerableComponent for MemoryGraph {
    fn vertices(self: Arc<Self>) -> VertexStream<'static> {
        // Pull-based over the ordered map: each step fetches the first
        // identity strictly after the previous one.
        Box::pin(stream::unfold(
            (self, None::<Identity>),
            |(graph, last)| {
                let bound = match &last {
                    Some(last) => Bound::Excluded(last.clone()),
                    None => Bound::Unbounded,
                };
                let next = graph
                    .vertices
                    .range((bound, Bound::Unbounded))
                    .next()
                    .map(|(id, vertex)| (id.clone(), vertex.clone()));
                futures::future::ready(
                    next.map(|(id, vertex)| (Ok(vertex), (graph, Some(id)))),
                )
            },
        ))
    }
}

#[async_trait]
impl RootedComponent for MemoryGraph {
    async fn roots(&self) -> Result<Vec<Identity>, GraphError> {
        Ok(self.roots.iter().cloned().collect())
    }
}

impl DynamicInComponent for MemoryGraph {
    fn parents(self: Arc<Self>, id: &Identity) -> VertexStream<'static> {
        self.neighbor_stream(id, true)
    }
}

impl DynamicOutComponent for MemoryGraph {
    fn children(self: Arc<Self>, id: &Identity) -> VertexStream<'static> {
        self.neighbor_stream(id, false)
    }
}
