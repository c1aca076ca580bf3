//! Workload score in `0..=100` derived from a member's open tasks.

use super::DeadlineUrgency;
use crate::team::domain::{MemberId, Task, TaskPriority};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scores above this value mark a member as overloaded.
pub const OVERLOAD_GATE: u8 = 80;

/// Raw scores are clamped to this ceiling before rescaling.
pub const RAW_SCORE_CEILING: u32 = 200;

/// Weight of a task's priority in the raw score.
#[must_use]
pub const fn priority_weight(priority: TaskPriority) -> u32 {
    match priority {
        TaskPriority::Critical => 40,
        TaskPriority::High => 20,
        TaskPriority::Medium => 10,
        TaskPriority::Low => 5,
    }
}

/// A member's live workload score.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct WorkloadScore(u8);

impl WorkloadScore {
    /// Scores the open tasks in `tasks` as of `now`.
    ///
    /// Done tasks are ignored. The raw score (priority weight times deadline
    /// multiplier, summed) is clamped to [`RAW_SCORE_CEILING`], halved, and
    /// rounded half up. The arithmetic runs in halves so ×1.5 stays exact.
    ///
    /// # Examples
    ///
    /// ```
    /// use coverly::workload::domain::WorkloadScore;
    /// use chrono::Utc;
    ///
    /// assert_eq!(WorkloadScore::from_tasks(std::iter::empty(), Utc::now()).value(), 0);
    /// ```
    #[must_use]
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>, now: DateTime<Utc>) -> Self {
        let raw_halves = tasks
            .into_iter()
            .filter(|task| task.is_open())
            .map(|task| {
                priority_weight(task.priority())
                    * DeadlineUrgency::classify(task.deadline(), now).multiplier_halves()
            })
            .fold(0_u32, u32::saturating_add);
        let clamped = raw_halves.min(RAW_SCORE_CEILING * 2);
        let rounded = (clamped + 2).div_euclid(4);
        Self(u8::try_from(rounded).unwrap_or(u8::MAX))
    }

    /// Wraps a score, saturating at 100.
    #[must_use]
    pub fn from_value(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Returns the score.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns the display band.
    #[must_use]
    pub const fn level(self) -> WorkloadLevel {
        WorkloadLevel::from_score(self.0)
    }

    /// Returns `true` when the score is above [`OVERLOAD_GATE`].
    #[must_use]
    pub const fn is_overloaded(self) -> bool {
        self.0 > OVERLOAD_GATE
    }
}

impl fmt::Display for WorkloadScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display band for a workload score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkloadLevel {
    /// Up to 30.
    Light,
    /// Up to 60.
    Moderate,
    /// Up to 80.
    Heavy,
    /// Above 80.
    Overloaded,
}

impl WorkloadLevel {
    /// Bands a raw score.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            0..=30 => Self::Light,
            31..=60 => Self::Moderate,
            61..=OVERLOAD_GATE => Self::Heavy,
            _ => Self::Overloaded,
        }
    }

    /// Returns the label shown to managers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Moderate => "Moderate",
            Self::Heavy => "Heavy",
            Self::Overloaded => "Overloaded",
        }
    }
}

impl fmt::Display for WorkloadLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Live workload summary for one member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberWorkload {
    /// Member scored.
    pub member: MemberId,
    /// Live score.
    pub score: WorkloadScore,
    /// Band of `score`.
    pub level: WorkloadLevel,
    /// Number of tasks not yet done.
    pub open_task_count: usize,
}

impl MemberWorkload {
    /// Scores a member's task list as of `now`.
    #[must_use]
    pub fn compute(member: MemberId, tasks: &[Task], now: DateTime<Utc>) -> Self {
        let score = WorkloadScore::from_tasks(tasks, now);
        Self {
            member,
            score,
            level: score.level(),
            open_task_count: tasks.iter().filter(|task| task.is_open()).count(),
        }
    }
}
