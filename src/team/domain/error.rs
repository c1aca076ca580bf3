//! Error types for team domain validation and parsing.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing or mutating team domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TeamDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The project tag is empty after trimming.
    #[error("project tag must not be empty")]
    EmptyProjectTag,

    /// The member display name is empty after trimming.
    #[error("member display name must not be empty")]
    EmptyDisplayName,

    /// The member email address is not plausibly an address.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The external identity reference is empty after trimming.
    #[error("external identity must not be empty")]
    EmptyExternalIdentity,

    /// The comment body is empty after trimming.
    #[error("comment body must not be empty")]
    EmptyComment,

    /// Completion rejection feedback is shorter than the configured minimum.
    #[error("feedback must be at least {minimum} characters, got {actual}")]
    FeedbackTooShort {
        /// Required minimum length.
        minimum: usize,
        /// Length of the submitted feedback after trimming.
        actual: usize,
    },

    /// Completion was already submitted and awaits review.
    #[error("completion for task {0} is already awaiting review")]
    CompletionAlreadySubmitted(TaskId),

    /// The task has no completion awaiting review.
    #[error("task {0} has no completion awaiting review")]
    CompletionNotPendingReview(TaskId),
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);

/// Error returned while parsing completion statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown completion status: {0}")]
pub struct ParseCompletionStatusError(pub String);

/// Error returned while parsing member roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown member role: {0}")]
pub struct ParseMemberRoleError(pub String);
