//! Candidate profiles and the eligibility ranking for handoffs.

use crate::availability::domain::{AvailabilityEntry, DateRange};
use crate::team::domain::{Member, MemberId, Task, TaskComment};
use crate::workload::domain::MemberWorkload;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

/// What the core knows about a potential assignee at proposal time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateProfile {
    /// Candidate member.
    pub member: MemberId,
    /// Display name.
    pub display_name: String,
    /// Normalized skill tags.
    pub skills: BTreeSet<String>,
    /// Live workload.
    pub workload: MemberWorkload,
    /// Declared availability entries.
    pub availability: Vec<AvailabilityEntry>,
}

impl CandidateProfile {
    /// Builds a profile from live state.
    #[must_use]
    pub fn from_member(
        member: &Member,
        tasks: &[Task],
        availability: Vec<AvailabilityEntry>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            member: member.id(),
            display_name: member.display_name().to_owned(),
            skills: member.skills().clone(),
            workload: MemberWorkload::compute(member.id(), tasks, now),
            availability,
        }
    }

    /// Returns `true` when the candidate carries the skill tag.
    #[must_use]
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.contains(&skill.trim().to_lowercase())
    }

    /// Returns `true` when the live score is above the overload gate.
    #[must_use]
    pub const fn is_overloaded(&self) -> bool {
        self.workload.score.is_overloaded()
    }

    /// Returns `true` when an `ooo` or `at_capacity` entry overlaps `range`.
    #[must_use]
    pub fn is_unavailable_during(&self, range: &DateRange) -> bool {
        self.availability
            .iter()
            .any(|entry| entry.kind().blocks_assignment() && entry.range().overlaps(range))
    }
}

/// A task offered to the generator, with the candidates eligible for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskContext {
    /// Task needing a new assignee.
    pub task: Task,
    /// Newest comments first.
    pub recent_comments: Vec<TaskComment>,
    /// Eligible candidates, best first.
    pub ranked_candidates: Vec<MemberId>,
}

/// Days from `today` through the task's deadline; just `today` when the
/// deadline has passed.
#[must_use]
pub fn coverage_window(task: &Task, today: NaiveDate) -> DateRange {
    DateRange::new(today, task.deadline().max(today))
        .unwrap_or_else(|_| DateRange::single_day(today))
}

/// Orders the candidates eligible to take over `task`, best first.
///
/// The current assignee is never eligible. Candidates unavailable from
/// `today` through the deadline are dropped unless nobody is free, then
/// overloaded candidates are dropped unless nobody else is left. The rest
/// are ordered by skill match, then lowest live score.
#[must_use]
pub fn rank_candidates<'a>(
    task: &Task,
    candidates: &'a [CandidateProfile],
    today: NaiveDate,
) -> Vec<&'a CandidateProfile> {
    let window = coverage_window(task, today);
    let mut eligible: Vec<&CandidateProfile> = candidates
        .iter()
        .filter(|profile| profile.member != task.assignee())
        .collect();
    if eligible
        .iter()
        .any(|profile| !profile.is_unavailable_during(&window))
    {
        eligible.retain(|profile| !profile.is_unavailable_during(&window));
    }
    if eligible.iter().any(|profile| !profile.is_overloaded()) {
        eligible.retain(|profile| !profile.is_overloaded());
    }

    let required = task.skill_required();
    eligible.sort_by_cached_key(|profile| {
        let skill_match = required.is_none_or(|skill| profile.has_skill(skill));
        (
            !skill_match,
            profile.workload.score,
            profile.display_name.clone(),
            profile.member,
        )
    });
    eligible
}
