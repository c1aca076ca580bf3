//! Approve-all batches and revert reports.

use super::{CoverageBatchId, ReassignmentId};
use crate::team::domain::{MemberId, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A task whose approval failed inside a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// Task that was not handed off.
    pub task_id: TaskId,
    /// Error message.
    pub reason: String,
}

/// Record of one approve-all action, kept so it can be reverted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageBatch {
    id: CoverageBatchId,
    initiated_by: MemberId,
    records: Vec<ReassignmentId>,
    failures: Vec<BatchFailure>,
    created_at: DateTime<Utc>,
    reverted_at: Option<DateTime<Utc>>,
}

impl CoverageBatch {
    /// Creates a batch from its per-task outcomes.
    #[must_use]
    pub fn new(
        initiated_by: MemberId,
        records: Vec<ReassignmentId>,
        failures: Vec<BatchFailure>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: CoverageBatchId::new(),
            initiated_by,
            records,
            failures,
            created_at: clock.utc(),
            reverted_at: None,
        }
    }

    /// Returns the batch identifier.
    #[must_use]
    pub const fn id(&self) -> CoverageBatchId {
        self.id
    }

    /// Returns the manager who ran the batch.
    #[must_use]
    pub const fn initiated_by(&self) -> MemberId {
        self.initiated_by
    }

    /// Returns the approved record identifiers.
    #[must_use]
    pub fn records(&self) -> &[ReassignmentId] {
        &self.records
    }

    /// Returns the tasks that could not be approved.
    #[must_use]
    pub fn failures(&self) -> &[BatchFailure] {
        &self.failures
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when a revert of the batch last ran.
    #[must_use]
    pub const fn reverted_at(&self) -> Option<DateTime<Utc>> {
        self.reverted_at
    }

    /// Records that a revert ran.
    pub fn mark_reverted(&mut self, clock: &impl Clock) {
        self.reverted_at = Some(clock.utc());
    }
}

/// Outcome of reverting one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum RevertOutcome {
    /// The task was restored.
    Reverted {
        /// Record reverted.
        record: ReassignmentId,
    },
    /// The record could not be reverted.
    Failed {
        /// Record attempted.
        record: ReassignmentId,
        /// Error message.
        reason: String,
    },
}

impl RevertOutcome {
    /// Returns `true` for a successful revert.
    #[must_use]
    pub const fn is_reverted(&self) -> bool {
        matches!(self, Self::Reverted { .. })
    }
}

/// Per-record outcomes of reverting a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRevertReport {
    /// Batch reverted.
    pub batch: CoverageBatchId,
    /// One outcome per record, in batch order.
    pub outcomes: Vec<RevertOutcome>,
}

impl BatchRevertReport {
    /// Counts successful reverts.
    #[must_use]
    pub fn reverted_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.is_reverted())
            .count()
    }
}
