//! The FIFO job queue.
//!
//! Multiple producers push; one or more workers pop. Each pushed item is
//! delivered to exactly one popping worker, and the wakeup signal is a
//! counting semaphore released once per push and acquired once per pop, so
//! no wakeup is ever lost.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use trellis_ops::{Operation, OperationContext};
use uuid::Uuid;

/// One queued unit of work: an operation paired with its context.
#[derive(Clone)]
pub struct QueuedJob {
    /// The job identifier
    pub id: Uuid,
    /// The operation to execute
    pub operation: Arc<dyn Operation>,
    /// The context to execute against
    pub context: Arc<OperationContext>,
}

/// A thread-safe FIFO queue of jobs.
pub struct JobQueue {
    items: Mutex<VecDeque<QueuedJob>>,
    signal: Semaphore,
}

impl Default for JobQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl JobQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            signal: Semaphore::new(0),
        }
    }

    /// Enqueue a job and wake exactly one waiting consumer.
    pub fn push(&self, job: QueuedJob) {
        self.items
            .lock()
            .expect("queue lock poisoned")
            .push_back(job);
        self.signal.add_permits(1);
    }

    /// Dequeue the oldest job, waiting until one is available. Returns
    /// `None` once the queue is closed.
    pub async fn pop(&self) -> Option<QueuedJob> {
        let permit = self.signal.acquire().await.ok()?;
        permit.forget();
        self.items
            .lock()
            .expect("queue lock poisoned")
            .pop_front()
    }

    /// Find a queued job by identifier without removing it. Linear scan,
    /// intended for diagnostics.
    pub fn seek(&self, id: &Uuid) -> Option<QueuedJob> {
        self.items
            .lock()
            .expect("queue lock poisoned")
            .iter()
            .find(|job| &job.id == id)
            .cloned()
    }

    /// The number of jobs currently waiting.
    pub fn len(&self) -> usize {
        self.items.lock().expect("queue lock poisoned").len()
    }

    /// Whether no jobs are waiting.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Close the queue: pending and future pops return `None`. Items not
    /// yet delivered stay in the queue and are never executed.
    pub fn close(&self) {
        self.signal.close();
    }
}
