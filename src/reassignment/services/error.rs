//! Errors for reassignment workflow operations.

use crate::availability::ports::AvailabilityRepositoryError;
use crate::reassignment::{
    domain::{CoverageBatchId, ReassignmentDomainError, ReassignmentId},
    ports::ReassignmentRepositoryError,
};
use crate::team::{
    domain::{MemberId, NotAuthorized, TaskId},
    ports::{MemberRepositoryError, TaskRepositoryError},
};
use thiserror::Error;

/// Service-level errors for the reassignment workflow.
#[derive(Debug, Error)]
pub enum ReassignmentServiceError {
    /// The actor may not perform the operation.
    #[error(transparent)]
    NotAuthorized(#[from] NotAuthorized),
    /// A record transition was not allowed.
    #[error(transparent)]
    Domain(#[from] ReassignmentDomainError),
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The member does not exist.
    #[error("member not found: {0}")]
    MemberNotFound(MemberId),
    /// The reassignment record does not exist.
    #[error("reassignment not found: {0}")]
    RecordNotFound(ReassignmentId),
    /// The coverage batch does not exist.
    #[error("coverage batch not found: {0}")]
    BatchNotFound(CoverageBatchId),
    /// The task is already assigned to the requested member.
    #[error("task {task} is already assigned to {member}")]
    AlreadyAssigned {
        /// Task requested.
        task: TaskId,
        /// Requested assignee.
        member: MemberId,
    },
    /// The manual handoff template failed to render.
    #[error("failed to render handoff document: {0}")]
    HandoffRender(#[from] minijinja::Error),
    /// Task repository operation failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// Member repository operation failed.
    #[error(transparent)]
    Members(#[from] MemberRepositoryError),
    /// Availability repository operation failed.
    #[error(transparent)]
    Availability(#[from] AvailabilityRepositoryError),
    /// Reassignment repository operation failed.
    #[error(transparent)]
    Records(#[from] ReassignmentRepositoryError),
}

/// Result type for reassignment workflow operations.
pub type ReassignmentServiceResult<T> = Result<T, ReassignmentServiceError>;
