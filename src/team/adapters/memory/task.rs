//! In-memory repository for tasks and their comments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::team::{
    domain::{MemberId, Task, TaskComment, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    assignee_index: HashMap<MemberId, Vec<TaskId>>,
    comments: HashMap<TaskId, Vec<TaskComment>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn index_assignee(state: &mut InMemoryTaskState, task: &Task) {
    state
        .assignee_index
        .entry(task.assignee())
        .or_default()
        .push(task.id());
}

/// Removes a task ID from the assignee index, cleaning up the entry if empty.
fn remove_from_index(state: &mut InMemoryTaskState, task_id: TaskId, assignee: MemberId) {
    if let Some(ids) = state.assignee_index.get_mut(&assignee) {
        ids.retain(|id| *id != task_id);
        if ids.is_empty() {
            state.assignee_index.remove(&assignee);
        }
    }
}

/// Collects matching tasks in creation order.
fn collect_sorted<'a>(tasks: impl Iterator<Item = &'a Task>) -> Vec<Task> {
    let mut found: Vec<Task> = tasks.cloned().collect();
    found.sort_by_key(|task| (task.created_at(), task.id()));
    found
}

fn assigned_to(state: &InMemoryTaskState, assignee: MemberId) -> impl Iterator<Item = &Task> {
    state
        .assignee_index
        .get(&assignee)
        .into_iter()
        .flatten()
        .filter_map(|id| state.tasks.get(id))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        index_assignee(&mut state, task);
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let old_assignee = state
            .tasks
            .get(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?
            .assignee();

        if old_assignee != task.assignee() {
            remove_from_index(&mut state, task.id(), old_assignee);
            index_assignee(&mut state, task);
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let removed = state
            .tasks
            .remove(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        remove_from_index(&mut state, id, removed.assignee());
        state.comments.remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_by_assignee(&self, assignee: MemberId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(collect_sorted(assigned_to(&state, assignee)))
    }

    async fn list_open_by_assignee(&self, assignee: MemberId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(collect_sorted(
            assigned_to(&state, assignee).filter(|task| task.is_open()),
        ))
    }

    async fn list_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(collect_sorted(
            state.tasks.values().filter(|task| task.status() == status),
        ))
    }

    async fn list_at_risk(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(collect_sorted(
            state.tasks.values().filter(|task| task.is_at_risk()),
        ))
    }

    async fn add_comment(&self, comment: &TaskComment) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.tasks.contains_key(&comment.task_id) {
            return Err(TaskRepositoryError::NotFound(comment.task_id));
        }
        state
            .comments
            .entry(comment.task_id)
            .or_default()
            .push(comment.clone());
        Ok(())
    }

    async fn recent_comments(
        &self,
        task_id: TaskId,
        limit: usize,
    ) -> TaskRepositoryResult<Vec<TaskComment>> {
        let state = self.read()?;
        let mut comments = state.comments.get(&task_id).cloned().unwrap_or_default();
        comments.reverse();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        comments.truncate(limit);
        Ok(comments)
    }
}
