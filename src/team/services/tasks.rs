//! Service layer for task operations and completion review.

use crate::policy::CoveragePolicy;
use crate::team::{
    domain::{
        Actor, CompletionFeedback, MemberId, NotAuthorized, ParseTaskPriorityError,
        ParseTaskStatusError, Task, TaskComment, TaskId, TaskParams, TaskPriority, TaskStatus,
        TeamDomainError,
    },
    ports::{MemberRepository, MemberRepositoryError, TaskRepository, TaskRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    assignee: MemberId,
    priority: String,
    deadline: NaiveDate,
    project: String,
    description: Option<String>,
    skill_required: Option<String>,
    notes: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with required task fields.
    ///
    /// `priority` is parsed from its storage form (`low`, `medium`, `high`,
    /// `critical`).
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        assignee: MemberId,
        priority: impl Into<String>,
        deadline: NaiveDate,
        project: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            assignee,
            priority: priority.into(),
            deadline,
            project: project.into(),
            description: None,
            skill_required: None,
            notes: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the required skill tag.
    #[must_use]
    pub fn with_skill_required(mut self, skill: impl Into<String>) -> Self {
        self.skill_required = Some(skill.into());
        self
    }

    /// Sets free-text notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TeamDomainError),
    /// The priority string is not a known priority.
    #[error(transparent)]
    InvalidPriority(#[from] ParseTaskPriorityError),
    /// The status string is not a known status.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),
    /// The actor may not perform the operation.
    #[error(transparent)]
    NotAuthorized(#[from] NotAuthorized),
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The intended assignee does not exist.
    #[error("assignee not found: {0}")]
    AssigneeNotFound(MemberId),
    /// Task repository operation failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// Member repository operation failed.
    #[error(transparent)]
    Members(#[from] MemberRepositoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task operations orchestration service.
pub struct TaskService<T, M, C>
where
    T: TaskRepository,
    M: MemberRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    members: Arc<M>,
    clock: Arc<C>,
    policy: CoveragePolicy,
}

impl<T, M, C> TaskService<T, M, C>
where
    T: TaskRepository,
    M: MemberRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service with the default policy.
    #[must_use]
    pub fn new(tasks: Arc<T>, members: Arc<M>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            members,
            clock,
            policy: CoveragePolicy::default(),
        }
    }

    /// Replaces the coverage policy.
    #[must_use]
    pub fn with_policy(mut self, policy: CoveragePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Creates a task on behalf of a manager.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when the actor is not a manager, the
    /// request fails validation, the assignee does not exist, or the store
    /// rejects the task.
    pub async fn create_task(
        &self,
        actor: Actor,
        request: CreateTaskRequest,
    ) -> TaskServiceResult<Task> {
        actor.ensure_manager("create tasks")?;
        let CreateTaskRequest {
            title,
            assignee,
            priority,
            deadline,
            project,
            description,
            skill_required,
            notes,
        } = request;

        let parsed_priority = TaskPriority::try_from(priority.as_str())?;
        let mut params = TaskParams::new(title, assignee, parsed_priority, deadline, project);
        if let Some(text) = description {
            params = params.with_description(text);
        }
        if let Some(skill) = skill_required {
            params = params.with_skill_required(skill);
        }
        if let Some(text) = notes {
            params = params.with_notes(text);
        }
        let task = Task::new(params, actor.member_id, &*self.clock)?;

        if self.members.find_by_id(assignee).await?.is_none() {
            return Err(TaskServiceError::AssigneeNotFound(assignee));
        }
        self.tasks.store(&task).await?;
        Ok(task)
    }

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Tasks`] when the lookup fails.
    pub async fn find_task(&self, id: TaskId) -> TaskServiceResult<Option<Task>> {
        Ok(self.tasks.find_by_id(id).await?)
    }

    /// Changes a task's work status.
    ///
    /// The assignee or a manager may change status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when the status string is unknown, the
    /// task is missing, or the actor is neither assignee nor manager.
    pub async fn update_status(
        &self,
        actor: Actor,
        task_id: TaskId,
        status: &str,
    ) -> TaskServiceResult<Task> {
        let next = TaskStatus::try_from(status)?;
        let mut task = self.load_task(task_id).await?;
        actor.ensure_acts_for(task.assignee(), "change task status")?;
        task.set_status(next, &*self.clock);
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when the actor is not a manager or the
    /// task does not exist.
    pub async fn delete_task(&self, actor: Actor, task_id: TaskId) -> TaskServiceResult<()> {
        actor.ensure_manager("delete tasks")?;
        self.tasks.delete(task_id).await?;
        info!(task_id = %task_id, manager = %actor.member_id, "task deleted");
        Ok(())
    }

    /// Adds a comment to a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when the body is blank or the task does
    /// not exist.
    pub async fn add_comment(
        &self,
        actor: Actor,
        task_id: TaskId,
        body: &str,
    ) -> TaskServiceResult<TaskComment> {
        let comment = TaskComment::new(task_id, actor.member_id, body, &*self.clock)?;
        self.tasks.add_comment(&comment).await?;
        Ok(comment)
    }

    /// Returns the newest comments on a task, capped by the policy.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Tasks`] when the lookup fails.
    pub async fn recent_comments(&self, task_id: TaskId) -> TaskServiceResult<Vec<TaskComment>> {
        Ok(self
            .tasks
            .recent_comments(task_id, self.policy.recent_comment_limit)
            .await?)
    }

    /// Reports a task complete, pending manager review.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when the task is missing, the actor is
    /// neither assignee nor manager, or a completion already awaits review.
    pub async fn submit_completion(
        &self,
        actor: Actor,
        task_id: TaskId,
    ) -> TaskServiceResult<Task> {
        let mut task = self.load_task(task_id).await?;
        actor.ensure_acts_for(task.assignee(), "submit completion")?;
        task.submit_completion(&*self.clock)?;
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Accepts a pending completion.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when the actor is not a manager, the
    /// task is missing, or no completion awaits review.
    pub async fn approve_completion(
        &self,
        actor: Actor,
        task_id: TaskId,
    ) -> TaskServiceResult<Task> {
        actor.ensure_manager("review completions")?;
        let mut task = self.load_task(task_id).await?;
        task.approve_completion(&*self.clock)?;
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Sends a pending completion back with feedback.
    ///
    /// Feedback is validated before anything is read or written.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] with
    /// [`TeamDomainError::FeedbackTooShort`] when the feedback is shorter
    /// than the policy minimum, or another [`TaskServiceError`] when the
    /// actor is not a manager, the task is missing, or no completion awaits
    /// review.
    pub async fn reject_completion(
        &self,
        actor: Actor,
        task_id: TaskId,
        feedback: &str,
    ) -> TaskServiceResult<Task> {
        actor.ensure_manager("review completions")?;
        let validated = CompletionFeedback::new(feedback, self.policy.min_feedback_length)?;
        let mut task = self.load_task(task_id).await?;
        task.request_changes(validated, &*self.clock)?;
        self.tasks.update(&task).await?;
        info!(task_id = %task_id, manager = %actor.member_id, "completion sent back");
        Ok(task)
    }

    async fn load_task(&self, task_id: TaskId) -> TaskServiceResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(task_id))
    }
}
