use crate::edge::Edge;
use crate::identity::Identity;
use crate::property::Property;
use serde::{Deserialize, Serialize};

/// A vertex: an identity, an ordered collection of properties, an optional
/// label and description, and the edges incident to it.
///
/// Vertices are value-like: transformations construct a new vertex rather
/// than mutating a shared one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vertex {
    /// The identity of the vertex
    pub id: Identity,

    /// An optional human-readable label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// An optional longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The ordered properties of the vertex
    #[serde(default)]
    pub properties: Vec<Property>,

    /// The edges incident to this vertex
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Vertex {
    /// Create a vertex with no properties or edges.
    pub fn new(id: impl Into<Identity>) -> Self {
        Self {
            id: id.into(),
            label: None,
            description: None,
            properties: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the properties.
    pub fn with_properties(mut self, properties: Vec<Property>) -> Self {
        self.properties = properties;
        self
    }

    /// Set the incident edges.
    pub fn with_edges(mut self, edges: Vec<Edge>) -> Self {
        self.edges = edges;
        self
    }

    /// The edges leading out of this vertex. An undirected edge counts in
    /// both directions.
    pub fn out_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges
            .iter()
            .filter(|edge| edge.source == self.id || (!edge.directed && edge.target == self.id))
    }

    /// The edges leading into this vertex. An undirected edge counts in
    /// both directions.
    pub fn in_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges
            .iter()
            .filter(|edge| edge.target == self.id || (!edge.directed && edge.source == self.id))
    }

    /// The identities of vertices reachable along out-edges.
    pub fn child_ids(&self) -> impl Iterator<Item = &Identity> {
        self.out_edges().map(move |edge| {
            if edge.source == self.id {
                &edge.target
            } else {
                &edge.source
            }
        })
    }

    /// The identities of vertices that reach this one along in-edges.
    pub fn parent_ids(&self) -> impl Iterator<Item = &Identity> {
        self.in_edges().map(move |edge| {
            if edge.target == self.id {
                &edge.source
            } else {
                &edge.target
            }
        })
    }

    /// Find a property by its identity.
    pub fn property(&self, id: &Identity) -> Option<&Property> {
        self.properties.iter().find(|property| &property.id == id)
    }

    /// Build a new vertex with every incident edge reversed. The source
    /// vertex is not mutated.
    pub fn with_edges_reversed(&self) -> Vertex {
        let mut derived = self.clone();
        derived.edges = self.edges.iter().map(Edge::reversed).collect();
        derived
    }
}
