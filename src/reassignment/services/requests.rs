//! Request and outcome types for the reassignment workflow.

use crate::reassignment::domain::{RawSuggestion, ReassignmentRecord, Suggestion};
use crate::team::domain::{MemberId, Task, TaskId};
use std::fmt;

/// Which tasks a proposal round covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProposalScope {
    /// Every task currently flagged at risk.
    AllAtRisk,
    /// Only these tasks. Missing or finished tasks are skipped.
    Tasks(Vec<TaskId>),
}

/// Why a generated suggestion was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The task id is not a valid identifier.
    MalformedTaskId,
    /// The task was not part of the request.
    UnknownTask,
    /// The task no longer exists or is done.
    TaskGone,
    /// The assignee id is not a valid identifier.
    MalformedAssigneeId,
    /// The assignee was not an eligible candidate for the task.
    IneligibleAssignee,
    /// The assignee already holds the task.
    CurrentAssignee,
    /// An earlier suggestion already covers the task.
    DuplicateTask,
}

impl DropReason {
    /// Returns a short machine-readable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MalformedTaskId => "malformed_task_id",
            Self::UnknownTask => "unknown_task",
            Self::TaskGone => "task_gone",
            Self::MalformedAssigneeId => "malformed_assignee_id",
            Self::IneligibleAssignee => "ineligible_assignee",
            Self::CurrentAssignee => "current_assignee",
            Self::DuplicateTask => "duplicate_task",
        }
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discarded suggestion and the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedSuggestion {
    /// The suggestion as generated.
    pub raw: RawSuggestion,
    /// Why it was discarded.
    pub reason: DropReason,
}

/// Validated suggestions from one proposal round. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Proposal {
    /// Suggestions that passed validation, in generator order.
    pub suggestions: Vec<Suggestion>,
    /// Suggestions that were discarded.
    pub dropped: Vec<DroppedSuggestion>,
}

impl Proposal {
    /// Finds the suggestion for a task.
    #[must_use]
    pub fn for_task(&self, task_id: TaskId) -> Option<&Suggestion> {
        self.suggestions
            .iter()
            .find(|suggestion| suggestion.task_id == task_id)
    }
}

/// Input to an approval: a suggestion or a manager's own choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproveRequest {
    task_id: TaskId,
    to_member: MemberId,
    handoff_doc: Option<String>,
    reasoning: Option<String>,
}

impl ApproveRequest {
    /// Approves a validated suggestion as generated.
    #[must_use]
    pub fn from_suggestion(suggestion: &Suggestion) -> Self {
        Self {
            task_id: suggestion.task_id,
            to_member: suggestion.to_member,
            handoff_doc: Some(suggestion.handoff_doc.clone()),
            reasoning: Some(suggestion.reasoning.clone()),
        }
    }

    /// Hands a task to a member the manager picked.
    ///
    /// Without a handoff document one is rendered from the policy
    /// template.
    #[must_use]
    pub const fn manual(task_id: TaskId, to_member: MemberId) -> Self {
        Self {
            task_id,
            to_member,
            handoff_doc: None,
            reasoning: None,
        }
    }

    /// Overrides the receiving member.
    #[must_use]
    pub const fn with_assignee(mut self, to_member: MemberId) -> Self {
        self.to_member = to_member;
        self
    }

    /// Sets the handoff document.
    #[must_use]
    pub fn with_handoff_doc(mut self, handoff_doc: impl Into<String>) -> Self {
        self.handoff_doc = Some(handoff_doc.into());
        self
    }

    /// Sets the reasoning.
    #[must_use]
    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }

    /// Returns the task to hand off.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the receiving member.
    #[must_use]
    pub const fn to_member(&self) -> MemberId {
        self.to_member
    }

    pub(super) fn into_parts(self) -> (Option<String>, Option<String>) {
        (self.handoff_doc, self.reasoning)
    }
}

/// Result of an approval: the approved record and the updated task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalOutcome {
    /// Approved record.
    pub record: ReassignmentRecord,
    /// Task after the handoff.
    pub task: Task,
}

/// Result of a revert: the marked record and the restored task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevertedHandoff {
    /// Record marked as reverted.
    pub record: ReassignmentRecord,
    /// Task after restoration.
    pub task: Task,
}
