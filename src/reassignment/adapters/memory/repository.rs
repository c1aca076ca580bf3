//! In-memory repository for reassignment records and coverage batches.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::reassignment::{
    domain::{CoverageBatch, CoverageBatchId, ReassignmentId, ReassignmentRecord},
    ports::{ReassignmentRepository, ReassignmentRepositoryError, ReassignmentRepositoryResult},
};
use crate::team::domain::TaskId;

/// Thread-safe in-memory reassignment repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReassignmentRepository {
    state: Arc<RwLock<InMemoryReassignmentState>>,
}

#[derive(Debug, Default)]
struct InMemoryReassignmentState {
    records: HashMap<ReassignmentId, ReassignmentRecord>,
    task_index: HashMap<TaskId, Vec<ReassignmentId>>,
    batches: HashMap<CoverageBatchId, CoverageBatch>,
}

impl InMemoryReassignmentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ReassignmentRepositoryResult<RwLockReadGuard<'_, InMemoryReassignmentState>> {
        self.state.read().map_err(|err| {
            ReassignmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(
        &self,
    ) -> ReassignmentRepositoryResult<RwLockWriteGuard<'_, InMemoryReassignmentState>> {
        self.state.write().map_err(|err| {
            ReassignmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl ReassignmentRepository for InMemoryReassignmentRepository {
    async fn store(&self, record: &ReassignmentRecord) -> ReassignmentRepositoryResult<()> {
        let mut state = self.write()?;
        if state.records.contains_key(&record.id()) {
            return Err(ReassignmentRepositoryError::DuplicateRecord(record.id()));
        }
        state
            .task_index
            .entry(record.task_id())
            .or_default()
            .push(record.id());
        state.records.insert(record.id(), record.clone());
        Ok(())
    }

    async fn update(&self, record: &ReassignmentRecord) -> ReassignmentRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .records
            .get_mut(&record.id())
            .ok_or(ReassignmentRepositoryError::NotFound(record.id()))?;
        *stored = record.clone();
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: ReassignmentId,
    ) -> ReassignmentRepositoryResult<Option<ReassignmentRecord>> {
        let state = self.read()?;
        Ok(state.records.get(&id).cloned())
    }

    async fn list_for_task(
        &self,
        task_id: TaskId,
    ) -> ReassignmentRepositoryResult<Vec<ReassignmentRecord>> {
        let state = self.read()?;
        Ok(state
            .task_index
            .get(&task_id)
            .into_iter()
            .flatten()
            .filter_map(|id| state.records.get(id))
            .cloned()
            .collect())
    }

    async fn store_batch(&self, batch: &CoverageBatch) -> ReassignmentRepositoryResult<()> {
        let mut state = self.write()?;
        if state.batches.contains_key(&batch.id()) {
            return Err(ReassignmentRepositoryError::DuplicateBatch(batch.id()));
        }
        state.batches.insert(batch.id(), batch.clone());
        Ok(())
    }

    async fn update_batch(&self, batch: &CoverageBatch) -> ReassignmentRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .batches
            .get_mut(&batch.id())
            .ok_or(ReassignmentRepositoryError::BatchNotFound(batch.id()))?;
        *stored = batch.clone();
        Ok(())
    }

    async fn find_batch(
        &self,
        id: CoverageBatchId,
    ) -> ReassignmentRepositoryResult<Option<CoverageBatch>> {
        let state = self.read()?;
        Ok(state.batches.get(&id).cloned())
    }
}
