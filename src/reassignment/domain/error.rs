//! Error types for reassignment state transitions.

use super::{ReassignmentId, ReassignmentStatus};
use crate::team::domain::{MemberId, TaskId};
use thiserror::Error;

/// Errors returned by reassignment record transitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReassignmentDomainError {
    /// The record is not in a state that allows the transition.
    #[error("reassignment {record} cannot move from {from} to {to}")]
    InvalidTransition {
        /// Record being transitioned.
        record: ReassignmentId,
        /// Current status.
        from: ReassignmentStatus,
        /// Requested status.
        to: ReassignmentStatus,
    },

    /// Only approved records can be reverted.
    #[error("reassignment {0} is not approved")]
    NotApproved(ReassignmentId),

    /// The record was already reverted.
    #[error("reassignment {0} was already reverted")]
    AlreadyReverted(ReassignmentId),

    /// The record holds no pre-approval snapshot to restore.
    #[error("reassignment {0} has no pre-approval snapshot")]
    MissingSnapshot(ReassignmentId),

    /// The task has moved on since the approval, so restoring would discard
    /// a later handoff.
    #[error(
        "cannot revert reassignment {record}: task {task} is now assigned to {actual}, not {expected}"
    )]
    RevertConflict {
        /// Record being reverted.
        record: ReassignmentId,
        /// Task the record moved.
        task: TaskId,
        /// Assignee the record set.
        expected: MemberId,
        /// Assignee the task has now.
        actual: MemberId,
    },
}

/// Error returned while parsing reassignment statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown reassignment status: {0}")]
pub struct ParseReassignmentStatusError(pub String);
