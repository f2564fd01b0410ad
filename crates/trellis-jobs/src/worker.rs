//! The background scheduler.
//!
//! Workers pop jobs until the queue closes. A job that completes gets its
//! record marked completed with the output attached; a job whose operation
//! fails is logged and its record left non-terminal. There is no automatic
//! retry and no mid-operation cancellation.

use crate::error::JobError;
use crate::item::{JobItem, JobRepository};
use crate::queue::{JobQueue, QueuedJob};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use trellis_ops::{Operation, OperationContext};
use uuid::Uuid;

/// Scheduler tuning parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchedulerConfig {
    /// The number of concurrent worker loops
    pub workers: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { workers: 1 }
    }
}

/// A background job scheduler: a FIFO queue, a worker pool, and the
/// repository job records are persisted to.
pub struct JobScheduler {
    queue: Arc<JobQueue>,
    repository: Arc<dyn JobRepository>,
    config: SchedulerConfig,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl JobScheduler {
    /// Create a scheduler. Workers do not run until [`JobScheduler::start`].
    pub fn new(repository: Arc<dyn JobRepository>, config: SchedulerConfig) -> Self {
        Self {
            queue: Arc::new(JobQueue::new()),
            repository,
            config,
            handles: Mutex::new(Vec::new()),
        }
    }

    /// The queue backing this scheduler.
    #[inline]
    pub fn queue(&self) -> &Arc<JobQueue> {
        &self.queue
    }

    /// Spawn the worker pool.
    pub fn start(&self) {
        let mut handles = self.handles.lock().expect("scheduler lock poisoned");
        for worker in 0..self.config.workers.max(1) {
            let queue = Arc::clone(&self.queue);
            let repository = Arc::clone(&self.repository);
            handles.push(tokio::spawn(run_worker(worker, queue, repository)));
        }
    }

    /// Persist a fresh job record and enqueue the operation. Returns the
    /// job identifier callers poll the repository with.
    pub async fn submit(
        &self,
        operation: Arc<dyn Operation>,
        context: Arc<OperationContext>,
    ) -> Result<Uuid, JobError> {
        let id = Uuid::new_v4();
        self.repository.upsert(JobItem::new(id)).await?;
        self.queue.push(QueuedJob {
            id,
            operation,
            context,
        });
        debug!(job = %id, "Job submitted");
        Ok(id)
    }

    /// Close the queue and wait for every worker to finish its current
    /// job. Jobs still waiting in the queue are never executed.
    pub async fn shutdown(&self) {
        self.queue.close();
        let handles = std::mem::take(
            &mut *self.handles.lock().expect("scheduler lock poisoned"),
        );
        for handle in handles {
            if let Err(join_error) = handle.await {
                error!(%join_error, "Job worker panicked");
            }
        }
    }
}

async fn run_worker(worker: usize, queue: Arc<JobQueue>, repository: Arc<dyn JobRepository>) {
    info!(worker, "Job worker started");
    while let Some(job) = queue.pop().await {
        debug!(
            worker,
            job = %job.id,
            operation = job.operation.discriminant(),
            "Executing job"
        );
        match job.operation.perform(&job.context).await {
            Ok(result) => {
                let record = match repository.get(&job.id).await {
                    Ok(Some(record)) => record,
                    Ok(None) => JobItem::new(job.id),
                    Err(storage_error) => {
                        error!(job = %job.id, %storage_error, "Failed to load job record");
                        continue;
                    }
                };
                if let Err(storage_error) = repository.upsert(record.completed_with(result)).await
                {
                    error!(job = %job.id, %storage_error, "Failed to record job result");
                }
            }
            Err(operation_error) => {
                // Left non-terminal on purpose: no retry, no rollback.
                error!(job = %job.id, %operation_error, "Job failed");
            }
        }
    }
    info!(worker, "Job worker stopped");
}
