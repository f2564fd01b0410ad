//!
//! Trellis Jobs - Background job execution for the Trellis Platform
//!
//! This crate defines the thread-safe FIFO job queue, the background
//! worker pool that executes operations against their contexts, and the
//! persisted job records with their repository contract.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Error types
pub mod error;

/// Job records and persistence
pub mod item;

/// The FIFO queue
pub mod queue;

/// The scheduler and worker pool
pub mod worker;

// Re-export key types
pub use error::JobError;
pub use item::{InMemoryJobRepository, JobItem, JobRepository};
pub use queue::{JobQueue, QueuedJob};
pub use worker::{JobScheduler, SchedulerConfig};
