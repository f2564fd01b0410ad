//! Job records and their persistence.
//!
//! A [`JobItem`] is the only externally observable shape of a job's
//! progress: `{ id, completed, result }`. Records are created at
//! submission and mutated only by the worker that owns the job; ownership
//! transfers atomically through the queue pop, so no two workers ever
//! write the same record concurrently.

use crate::error::JobError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// The persisted record of a submitted job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobItem {
    /// The job identifier
    pub id: Uuid,

    /// Whether the job has reached its terminal state
    pub completed: bool,

    /// The operation output, present once completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    /// When the job was submitted
    pub created_at: DateTime<Utc>,
}

impl JobItem {
    /// Create a fresh, non-terminal record.
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            completed: false,
            result: None,
            created_at: Utc::now(),
        }
    }

    /// Build the completed version of this record carrying its result.
    pub fn completed_with(&self, result: Value) -> JobItem {
        JobItem {
            id: self.id,
            completed: true,
            result: Some(result),
            created_at: self.created_at,
        }
    }
}

/// Persistence for job records.
#[async_trait]
pub trait JobRepository: Send + Sync + 'static {
    /// Insert or replace a record.
    async fn upsert(&self, item: JobItem) -> Result<(), JobError>;

    /// Fetch a record by identifier.
    async fn get(&self, id: &Uuid) -> Result<Option<JobItem>, JobError>;

    /// Delete a record. Deleting an absent record is not an error.
    async fn delete(&self, id: &Uuid) -> Result<(), JobError>;

    /// Every stored record, oldest first.
    async fn list(&self) -> Result<Vec<JobItem>, JobError>;
}

/// An in-memory repository for tests and single-process deployments.
#[derive(Debug, Default)]
pub struct InMemoryJobRepository {
    items: RwLock<HashMap<Uuid, JobItem>>,
}

impl InMemoryJobRepository {
    /// Create an empty repository.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn upsert(&self, item: JobItem) -> Result<(), JobError> {
        self.items.write().await.insert(item.id, item);
        Ok(())
    }

    async fn get(&self, id: &Uuid) -> Result<Option<JobItem>, JobError> {
        Ok(self.items.read().await.get(id).cloned())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), JobError> {
        self.items.write().await.remove(id);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<JobItem>, JobError> {
        let mut items: Vec<JobItem> = self.items.read().await.values().cloned().collect();
        items.sort_by_key(|item| item.created_at);
        Ok(items)
    }
}
