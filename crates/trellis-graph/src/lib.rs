//!
//! Trellis Graph - Graph data model for the Trellis Platform
//!
//! This crate defines the graph core: polymorphic identities, the layered
//! capability registry, the vertex/edge/property data model, the graph
//! capability contracts with default-derived fallbacks, a finite in-memory
//! snapshot graph, and deterministic synthetic graph generators.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Capability contracts and stream aliases
pub mod capabilities;

/// The layered capability registry
pub mod components;

/// Edge value type
pub mod edge;

/// Error types
pub mod error;

/// The base graph type
pub mod graph;

/// Polymorphic identities
pub mod identity;

/// Finite in-memory snapshot graph
pub mod memory;

/// Properties and observations
pub mod property;

/// Deterministic synthetic generators
pub mod synthetic;

/// Default-derived traversals
pub mod traversal;

/// Vertex value type
pub mod vertex;

// Re-export key types
pub use capabilities::{
    DynamicComponent, DynamicInComponent, DynamicOutComponent, EdgeStream, EnumerableComponent,
    RootedComponent, VertexStream,
};
pub use components::{Component, ComponentKind, ComponentStack};
pub use edge::Edge;
pub use error::GraphError;
pub use graph::Graph;
pub use identity::Identity;
pub use memory::MemoryGraph;
pub use property::{Observation, Property};
pub use synthetic::{
    generate_finite_graph, FiniteSyntheticOptions, InfiniteSyntheticGraph,
    InfiniteSyntheticOptions,
};
pub use vertex::Vertex;
