//!
//! Trellis Ops - Operations and workflows for the Trellis Platform
//!
//! This crate defines the typed operation abstraction, the discriminant
//! registry for polymorphic operation payloads, the built-in operations,
//! and the selector/actor workflow engine.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Execution contexts
pub mod context;

/// Error types
pub mod error;

/// The operation contracts
pub mod operation;

/// Built-in operations
pub mod ops;

/// The discriminant registry
pub mod registry;

/// The workflow engine
pub mod workflow;

// Re-export key types
pub use context::OperationContext;
pub use error::OperationError;
pub use operation::{Operation, TypedOperation};
pub use ops::{DelayOperation, GenerateGraphOperation, ReverseEdgesOperation};
pub use registry::{OperationRegistry, DISCRIMINANT_FIELD};
pub use workflow::{Actor, Selector, Workflow, WorkflowOperation, WorkflowStep};
