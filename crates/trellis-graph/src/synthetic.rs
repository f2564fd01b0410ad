//! Deterministic synthetic graph generators.
//!
//! Two generators share one contract: equal seeds produce equal graphs.
//! The finite generator materializes an undirected [`MemoryGraph`]; the
//! infinite generator derives each vertex and its children on demand from
//! the graph seed and the vertex identity, so the graph is never
//! materialized as a whole.

use crate::capabilities::{DynamicComponent, DynamicOutComponent, RootedComponent, VertexStream};
use crate::edge::Edge;
use crate::error::GraphError;
use crate::identity::Identity;
use crate::memory::MemoryGraph;
use crate::property::Property;
use crate::vertex::Vertex;
use async_trait::async_trait;
use futures::stream;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Arc;
use uuid::Uuid;

/// Parameters for the finite undirected generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FiniteSyntheticOptions {
    /// The generator seed; equal seeds produce equal graphs
    pub seed: u64,
    /// The number of vertices to generate
    pub vertex_count: usize,
    /// The probability, per vertex pair, of an edge between them
    pub edge_probability: f64,
}

impl Default for FiniteSyntheticOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            vertex_count: 10,
            edge_probability: 0.2,
        }
    }
}

/// Generate a finite undirected graph from the given options.
///
/// Vertices are identified by deterministically generated UUIDs and carry a
/// numeric `value` property drawn from the same seeded stream.
pub fn generate_finite_graph(options: &FiniteSyntheticOptions) -> MemoryGraph {
    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut graph = MemoryGraph::new(Uuid::from_u128(rng.gen()), false);

    let ids: Vec<Identity> = (0..options.vertex_count)
        .map(|_| Identity::from(Uuid::from_u128(rng.gen())))
        .collect();

    let mut edges: Vec<Vec<Edge>> = vec![Vec::new(); ids.len()];
    for i in 0..ids.len() {
        for j in (i + 1)..ids.len() {
            if rng.gen::<f64>() < options.edge_probability {
                let edge = Edge::undirected(ids[i].clone(), ids[j].clone());
                edges[i].push(edge.clone());
                edges[j].push(edge);
            }
        }
    }

    tracing::debug!(
        seed = options.seed,
        vertices = options.vertex_count,
        "Generating finite synthetic graph"
    );

    for (index, id) in ids.iter().enumerate() {
        let value: f64 = rng.gen_range(0.0..100.0);
        let vertex = Vertex::new(id.clone())
            .with_label(format!("vertex-{index}"))
            .with_properties(vec![Property::with_values("value", vec![json!(value)])])
            .with_edges(std::mem::take(&mut edges[index]));
        graph.insert(vertex);
    }

    graph
}

/// Parameters for the infinite directed generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InfiniteSyntheticOptions {
    /// The generator seed; equal seeds produce equal graphs
    pub seed: u64,
    /// The number of child vertices under every vertex
    pub child_count: usize,
}

impl Default for InfiniteSyntheticOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            child_count: 2,
        }
    }
}

/// An infinite directed dynamic graph.
///
/// Every vertex exists: its label, property values, and child identities
/// are a pure function of the graph seed and the vertex identity, so any
/// path from the root can be re-derived at any time.
#[derive(Debug, Clone)]
pub struct InfiniteSyntheticGraph {
    options: InfiniteSyntheticOptions,
    root: Identity,
}

impl InfiniteSyntheticGraph {
    /// Create an infinite graph from the given options.
    pub fn new(options: InfiniteSyntheticOptions) -> Self {
        let mut rng = StdRng::seed_from_u64(options.seed);
        let root = Identity::from(Uuid::from_u128(rng.gen()));
        Self { options, root }
    }

    /// The identity of the root vertex.
    #[inline]
    pub fn root(&self) -> &Identity {
        &self.root
    }

    fn vertex_rng(&self, id: &Uuid) -> StdRng {
        // Fold the 128-bit identity into the graph seed so each vertex has
        // its own reproducible stream.
        let bits = id.as_u128();
        StdRng::seed_from_u64(self.options.seed ^ (bits as u64) ^ ((bits >> 64) as u64))
    }

    fn derive(&self, id: &Identity) -> Result<Vertex, GraphError> {
        let uuid = id.require_uuid()?;
        let mut rng = self.vertex_rng(&uuid);

        let child_ids: Vec<Identity> = (0..self.options.child_count)
            .map(|_| Identity::from(Uuid::from_u128(rng.gen())))
            .collect();
        let value: f64 = rng.gen_range(0.0..100.0);

        let edges = child_ids
            .iter()
            .map(|child| Edge::new(id.clone(), child.clone()))
            .collect();

        Ok(Vertex::new(id.clone())
            .with_label(format!("synthetic-{}", &uuid.to_string()[..8]))
            .with_properties(vec![Property::with_values("value", vec![json!(value)])])
            .with_edges(edges))
    }
}

#[async_trait]
impl DynamicComponent for InfiniteSyntheticGraph {
    async fn vertex(&self, id: &Identity) -> Result<Vertex, GraphError> {
        self.derive(id)
    }
}

#[async_trait]
impl RootedComponent for InfiniteSyntheticGraph {
    async fn roots(&self) -> Result<Vec<Identity>, GraphError> {
        Ok(vec![self.root.clone()])
    }
}

impl DynamicOutComponent for InfiniteSyntheticGraph {
    fn children(self: Arc<Self>, id: &Identity) -> VertexStream<'static> {
        let mut pending: VecDeque<Identity> = match self.derive(id) {
            Ok(vertex) => vertex.child_ids().cloned().collect(),
            Err(error) => {
                return Box::pin(stream::once(futures::future::ready(Err(error))));
            }
        };
        Box::pin(stream::unfold(self, move |graph| {
            let item = pending.pop_front().map(|next| graph.derive(&next));
            futures::future::ready(item.map(|item| (item, graph)))
        }))
    }
}
