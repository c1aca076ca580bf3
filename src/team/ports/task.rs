//! Repository port for task persistence and indexed lookup.

use crate::team::domain::{MemberId, Task, TaskComment, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Replaces an existing task. Concurrent updates are last-write-wins.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Deletes a task and its comments.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task assigned to a member, done or not.
    async fn list_by_assignee(&self, assignee: MemberId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the member's tasks whose status is not `done`.
    async fn list_open_by_assignee(&self, assignee: MemberId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns all tasks with the given status.
    async fn list_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns all tasks currently flagged at risk.
    async fn list_at_risk(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Stores a comment on an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn add_comment(&self, comment: &TaskComment) -> TaskRepositoryResult<()>;

    /// Returns up to `limit` comments on a task, newest first.
    async fn recent_comments(
        &self,
        task_id: TaskId,
        limit: usize,
    ) -> TaskRepositoryResult<Vec<TaskComment>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
