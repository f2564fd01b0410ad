use crate::identity::Identity;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A connection between two vertices.
///
/// Equality and hashing are structural: two edges are equal when they share
/// source, target, and directedness, regardless of their own identities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// The optional identity of the edge itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Identity>,

    /// The identity of the source vertex
    pub source: Identity,

    /// The identity of the target vertex
    pub target: Identity,

    /// Whether the edge is directed from source to target
    #[serde(default = "default_directed")]
    pub directed: bool,
}

fn default_directed() -> bool {
    true
}

impl Edge {
    /// Create a directed edge from source to target.
    pub fn new(source: impl Into<Identity>, target: impl Into<Identity>) -> Self {
        Self {
            id: None,
            source: source.into(),
            target: target.into(),
            directed: true,
        }
    }

    /// Create an undirected edge between two vertices.
    pub fn undirected(source: impl Into<Identity>, target: impl Into<Identity>) -> Self {
        Self {
            id: None,
            source: source.into(),
            target: target.into(),
            directed: false,
        }
    }

    /// Attach an identity to the edge.
    pub fn with_id(mut self, id: impl Into<Identity>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Build the edge with source and target swapped. The source edge is
    /// not mutated.
    pub fn reversed(&self) -> Edge {
        Edge {
            id: self.id.clone(),
            source: self.target.clone(),
            target: self.source.clone(),
            directed: self.directed,
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
            && self.target == other.target
            && self.directed == other.directed
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
        self.target.hash(state);
        self.directed.hash(state);
    }
}
