//! Repository port for reassignment records and coverage batches.

use crate::reassignment::domain::{
    CoverageBatch, CoverageBatchId, ReassignmentId, ReassignmentRecord,
};
use crate::team::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for reassignment repository operations.
pub type ReassignmentRepositoryResult<T> = Result<T, ReassignmentRepositoryError>;

/// Reassignment persistence contract.
#[async_trait]
pub trait ReassignmentRepository: Send + Sync {
    /// Stores a new record.
    ///
    /// # Errors
    ///
    /// Returns [`ReassignmentRepositoryError::DuplicateRecord`] when the
    /// record ID already exists.
    async fn store(&self, record: &ReassignmentRecord) -> ReassignmentRepositoryResult<()>;

    /// Replaces a stored record.
    ///
    /// # Errors
    ///
    /// Returns [`ReassignmentRepositoryError::NotFound`] when the record
    /// does not exist.
    async fn update(&self, record: &ReassignmentRecord) -> ReassignmentRepositoryResult<()>;

    /// Finds a record by identifier.
    async fn find_by_id(
        &self,
        id: ReassignmentId,
    ) -> ReassignmentRepositoryResult<Option<ReassignmentRecord>>;

    /// Lists every record for a task, oldest first.
    async fn list_for_task(
        &self,
        task_id: TaskId,
    ) -> ReassignmentRepositoryResult<Vec<ReassignmentRecord>>;

    /// Stores a new coverage batch.
    ///
    /// # Errors
    ///
    /// Returns [`ReassignmentRepositoryError::DuplicateBatch`] when the
    /// batch ID already exists.
    async fn store_batch(&self, batch: &CoverageBatch) -> ReassignmentRepositoryResult<()>;

    /// Replaces a stored coverage batch.
    ///
    /// # Errors
    ///
    /// Returns [`ReassignmentRepositoryError::BatchNotFound`] when the batch
    /// does not exist.
    async fn update_batch(&self, batch: &CoverageBatch) -> ReassignmentRepositoryResult<()>;

    /// Finds a coverage batch by identifier.
    async fn find_batch(
        &self,
        id: CoverageBatchId,
    ) -> ReassignmentRepositoryResult<Option<CoverageBatch>>;
}

/// Errors returned by reassignment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ReassignmentRepositoryError {
    /// A record with the same identifier already exists.
    #[error("duplicate reassignment identifier: {0}")]
    DuplicateRecord(ReassignmentId),

    /// The record was not found.
    #[error("reassignment not found: {0}")]
    NotFound(ReassignmentId),

    /// A batch with the same identifier already exists.
    #[error("duplicate coverage batch identifier: {0}")]
    DuplicateBatch(CoverageBatchId),

    /// The batch was not found.
    #[error("coverage batch not found: {0}")]
    BatchNotFound(CoverageBatchId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ReassignmentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
