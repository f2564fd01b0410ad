//! Built-in operations.

/// Delay-and-echo
pub mod delay;

/// Synthetic graph materialization
pub mod generate_graph;

/// Edge direction reversal
pub mod reverse_edges;

pub use delay::DelayOperation;
pub use generate_graph::GenerateGraphOperation;
pub use reverse_edges::ReverseEdgesOperation;
