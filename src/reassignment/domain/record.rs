//! Reassignment record aggregate and its one-way status machine.

use super::{ParseReassignmentStatusError, ReassignmentDomainError, ReassignmentId};
use crate::team::domain::{AssignmentState, MemberId, Task, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow status of a reassignment record.
///
/// Transitions only run `pending -> approved` or `pending -> rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReassignmentStatus {
    /// Accepted for review, not yet applied.
    Pending,
    /// Applied to the task.
    Approved,
    /// Declined; the task was never touched.
    Rejected,
}

impl ReassignmentStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Returns `true` for approved and rejected records.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for ReassignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ReassignmentStatus {
    type Error = ParseReassignmentStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseReassignmentStatusError(value.to_owned())),
        }
    }
}

/// Where a record's handoff document came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandoffOrigin {
    /// Written by a generator or a manager.
    #[default]
    Supplied,
    /// Rendered from the manual handoff template.
    Template,
}

/// Parameters for opening a reassignment record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReassignmentParams {
    /// Task to hand off.
    pub task_id: TaskId,
    /// Current assignee.
    pub from_member: MemberId,
    /// Proposed assignee.
    pub to_member: MemberId,
    /// Manager opening the record.
    pub initiated_by: MemberId,
    /// Handoff document for the new assignee.
    pub handoff_doc: String,
    /// Whether the handoff document was rendered from the template.
    pub handoff_origin: HandoffOrigin,
    /// Why this assignee was chosen.
    pub reasoning: String,
}

/// Audit and workflow entry for one proposed handoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReassignmentRecord {
    id: ReassignmentId,
    task_id: TaskId,
    from_member: MemberId,
    to_member: MemberId,
    initiated_by: MemberId,
    status: ReassignmentStatus,
    handoff_doc: String,
    #[serde(default)]
    handoff_origin: HandoffOrigin,
    reasoning: String,
    prior_state: Option<AssignmentState>,
    created_at: DateTime<Utc>,
    approved_at: Option<DateTime<Utc>>,
    rejected_at: Option<DateTime<Utc>>,
    rejection_reason: Option<String>,
    reverted_at: Option<DateTime<Utc>>,
    reverted_by: Option<MemberId>,
}

impl ReassignmentRecord {
    /// Opens a pending record.
    #[must_use]
    pub fn new_pending(params: ReassignmentParams, clock: &impl Clock) -> Self {
        Self {
            id: ReassignmentId::new(),
            task_id: params.task_id,
            from_member: params.from_member,
            to_member: params.to_member,
            initiated_by: params.initiated_by,
            status: ReassignmentStatus::Pending,
            handoff_doc: params.handoff_doc,
            handoff_origin: params.handoff_origin,
            reasoning: params.reasoning,
            prior_state: None,
            created_at: clock.utc(),
            approved_at: None,
            rejected_at: None,
            rejection_reason: None,
            reverted_at: None,
            reverted_by: None,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> ReassignmentId {
        self.id
    }

    /// Returns the task the record hands off.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the assignee at the time the record was opened.
    #[must_use]
    pub const fn from_member(&self) -> MemberId {
        self.from_member
    }

    /// Returns the receiving assignee.
    #[must_use]
    pub const fn to_member(&self) -> MemberId {
        self.to_member
    }

    /// Returns the manager who opened the record.
    #[must_use]
    pub const fn initiated_by(&self) -> MemberId {
        self.initiated_by
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> ReassignmentStatus {
        self.status
    }

    /// Returns the handoff document.
    #[must_use]
    pub fn handoff_doc(&self) -> &str {
        &self.handoff_doc
    }

    /// Returns where the handoff document came from.
    #[must_use]
    pub const fn handoff_origin(&self) -> HandoffOrigin {
        self.handoff_origin
    }

    /// Returns the reasoning.
    #[must_use]
    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    /// Returns the task's assignment immediately before approval.
    #[must_use]
    pub const fn prior_state(&self) -> Option<&AssignmentState> {
        self.prior_state.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the record was approved.
    #[must_use]
    pub const fn approved_at(&self) -> Option<DateTime<Utc>> {
        self.approved_at
    }

    /// Returns when the record was rejected.
    #[must_use]
    pub const fn rejected_at(&self) -> Option<DateTime<Utc>> {
        self.rejected_at
    }

    /// Returns the rejection reason, if one was given.
    #[must_use]
    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    /// Returns when the handoff was reverted.
    #[must_use]
    pub const fn reverted_at(&self) -> Option<DateTime<Utc>> {
        self.reverted_at
    }

    /// Returns the manager who reverted the handoff.
    #[must_use]
    pub const fn reverted_by(&self) -> Option<MemberId> {
        self.reverted_by
    }

    /// Returns `true` once the handoff has been undone.
    #[must_use]
    pub const fn is_reverted(&self) -> bool {
        self.reverted_at.is_some()
    }

    /// Approves the record, possibly for a different assignee than
    /// proposed, and stores the task's prior assignment.
    ///
    /// # Errors
    ///
    /// Returns [`ReassignmentDomainError::InvalidTransition`] unless the
    /// record is pending.
    pub fn approve(
        &mut self,
        to_member: MemberId,
        prior_state: AssignmentState,
        clock: &impl Clock,
    ) -> Result<(), ReassignmentDomainError> {
        self.ensure_pending(ReassignmentStatus::Approved)?;
        self.status = ReassignmentStatus::Approved;
        self.to_member = to_member;
        self.prior_state = Some(prior_state);
        self.approved_at = Some(clock.utc());
        Ok(())
    }

    /// Replaces a template-rendered handoff document ahead of approval,
    /// for example when the receiving assignee changes.
    ///
    /// # Errors
    ///
    /// Returns [`ReassignmentDomainError::InvalidTransition`] unless the
    /// record is pending.
    pub fn rewrite_handoff(&mut self, handoff_doc: String) -> Result<(), ReassignmentDomainError> {
        self.ensure_pending(ReassignmentStatus::Approved)?;
        self.handoff_doc = handoff_doc;
        self.handoff_origin = HandoffOrigin::Template;
        Ok(())
    }

    /// Rejects the record.
    ///
    /// # Errors
    ///
    /// Returns [`ReassignmentDomainError::InvalidTransition`] unless the
    /// record is pending.
    pub fn reject(
        &mut self,
        reason: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), ReassignmentDomainError> {
        self.ensure_pending(ReassignmentStatus::Rejected)?;
        self.status = ReassignmentStatus::Rejected;
        self.rejection_reason = reason
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty());
        self.rejected_at = Some(clock.utc());
        Ok(())
    }

    /// Checks that `task` can be restored from this record and returns the
    /// snapshot to restore.
    ///
    /// # Errors
    ///
    /// Returns a [`ReassignmentDomainError`] when the record is not
    /// approved, was already reverted, has no snapshot, or the task is no
    /// longer held by the record's receiving assignee.
    pub fn revert_snapshot(
        &self,
        task: &Task,
    ) -> Result<&AssignmentState, ReassignmentDomainError> {
        if self.status != ReassignmentStatus::Approved {
            return Err(ReassignmentDomainError::NotApproved(self.id));
        }
        if self.is_reverted() {
            return Err(ReassignmentDomainError::AlreadyReverted(self.id));
        }
        let snapshot = self
            .prior_state
            .as_ref()
            .ok_or(ReassignmentDomainError::MissingSnapshot(self.id))?;
        if task.assignee() != self.to_member {
            return Err(ReassignmentDomainError::RevertConflict {
                record: self.id,
                task: self.task_id,
                expected: self.to_member,
                actual: task.assignee(),
            });
        }
        Ok(snapshot)
    }

    /// Marks the handoff as undone. History is kept: the status stays
    /// `approved`.
    pub fn mark_reverted(&mut self, by: MemberId, clock: &impl Clock) {
        self.reverted_at = Some(clock.utc());
        self.reverted_by = Some(by);
    }

    fn ensure_pending(&self, to: ReassignmentStatus) -> Result<(), ReassignmentDomainError> {
        if self.status == ReassignmentStatus::Pending {
            Ok(())
        } else {
            Err(ReassignmentDomainError::InvalidTransition {
                record: self.id,
                from: self.status,
                to,
            })
        }
    }
}
