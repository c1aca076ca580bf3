//! Task comments, surfaced to the suggestion generator as recent context.

use super::{CommentId, MemberId, TaskId, TeamDomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A comment left on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskComment {
    /// Comment identifier.
    pub id: CommentId,
    /// Task the comment belongs to.
    pub task_id: TaskId,
    /// Comment author.
    pub author: MemberId,
    /// Comment text.
    pub body: String,
    /// When the comment was written.
    pub created_at: DateTime<Utc>,
}

impl TaskComment {
    /// Creates a comment with a trimmed body.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::EmptyComment`] when the body is blank.
    pub fn new(
        task_id: TaskId,
        author: MemberId,
        body: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, TeamDomainError> {
        let raw = body.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TeamDomainError::EmptyComment);
        }
        Ok(Self {
            id: CommentId::new(),
            task_id,
            author,
            body: trimmed.to_owned(),
            created_at: clock.utc(),
        })
    }
}
