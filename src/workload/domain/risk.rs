//! Rules deciding whether a task needs manager attention.

use super::{WorkloadScore, is_within_days};
use crate::availability::domain::{AvailabilityEntry, AvailabilityKind};
use crate::policy::CoveragePolicy;
use crate::team::domain::{Task, TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A rule that put a task at risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskReason {
    /// The assignee is overloaded and the deadline is near.
    Overloaded,
    /// The assignee is out of office on the deadline.
    OutOfOffice,
    /// The task is blocked.
    Blocked,
    /// The task has not started and the deadline is near.
    TodoNearDeadline,
}

impl RiskReason {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overloaded => "overloaded",
            Self::OutOfOffice => "out_of_office",
            Self::Blocked => "blocked",
            Self::TodoNearDeadline => "todo_near_deadline",
        }
    }
}

impl fmt::Display for RiskReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of classifying one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Task classified.
    pub task_id: TaskId,
    /// Every rule that fired, in rule order.
    pub reasons: Vec<RiskReason>,
}

impl RiskAssessment {
    /// Returns `true` when any rule fired.
    #[must_use]
    pub fn is_at_risk(&self) -> bool {
        !self.reasons.is_empty()
    }
}

/// Classifies `task`.
///
/// `assignee_score` must be the live score of the task's current assignee
/// and `assignee_availability` that assignee's entries. Done tasks are never
/// at risk.
#[must_use]
pub fn assess(
    task: &Task,
    assignee_score: WorkloadScore,
    assignee_availability: &[AvailabilityEntry],
    policy: &CoveragePolicy,
    now: DateTime<Utc>,
) -> RiskAssessment {
    let mut reasons = Vec::new();
    if task.is_open() {
        let deadline = task.deadline();
        if assignee_score.is_overloaded()
            && is_within_days(deadline, now, policy.overload_risk_horizon_days)
        {
            reasons.push(RiskReason::Overloaded);
        }
        if assignee_availability
            .iter()
            .any(|entry| entry.kind() == AvailabilityKind::Ooo && entry.range().contains(deadline))
        {
            reasons.push(RiskReason::OutOfOffice);
        }
        if task.status() == TaskStatus::Blocked {
            reasons.push(RiskReason::Blocked);
        }
        if task.status() == TaskStatus::Todo
            && is_within_days(deadline, now, policy.todo_risk_horizon_days)
        {
            reasons.push(RiskReason::TodoNearDeadline);
        }
    }
    RiskAssessment {
        task_id: task.id(),
        reasons,
    }
}
