//! Errors shared by the workload and risk services.

use crate::availability::ports::AvailabilityRepositoryError;
use crate::team::{
    domain::{MemberId, NotAuthorized, TaskId},
    ports::{MemberRepositoryError, TaskRepositoryError},
};
use thiserror::Error;

/// Service-level errors for workload and risk operations.
#[derive(Debug, Error)]
pub enum WorkloadServiceError {
    /// The actor may not perform the operation.
    #[error(transparent)]
    NotAuthorized(#[from] NotAuthorized),
    /// The member does not exist.
    #[error("member not found: {0}")]
    MemberNotFound(MemberId),
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// Task repository operation failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// Member repository operation failed.
    #[error(transparent)]
    Members(#[from] MemberRepositoryError),
    /// Availability repository operation failed.
    #[error(transparent)]
    Availability(#[from] AvailabilityRepositoryError),
}

/// Result type for workload and risk service operations.
pub type WorkloadServiceResult<T> = Result<T, WorkloadServiceError>;
