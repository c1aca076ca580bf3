//! Task aggregate root and related lifecycle types.

use super::{
    MemberId, ParseCompletionStatusError, ParseTaskPriorityError, ParseTaskStatusError, TaskId,
    TeamDomainError,
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task priority, ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Normal work.
    Medium,
    /// Needs attention soon.
    High,
    /// Drop everything.
    Critical,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

/// Task work status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started.
    Todo,
    /// Being worked on.
    InProgress,
    /// Waiting on something outside the assignee's control.
    Blocked,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Blocked => "blocked",
            Self::Done => "done",
        }
    }

    /// Returns `true` for every status except [`TaskStatus::Done`].
    #[must_use]
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Done)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "blocked" => Ok(Self::Blocked),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Manager review state of a member's self-reported completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    /// The assignee has not reported the task complete.
    #[default]
    NotSubmitted,
    /// Completion was reported and awaits a manager.
    PendingReview,
    /// A manager accepted the completion.
    Approved,
    /// A manager sent the task back with feedback.
    ChangesRequested,
}

impl CompletionStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotSubmitted => "not_submitted",
            Self::PendingReview => "pending_review",
            Self::Approved => "approved",
            Self::ChangesRequested => "changes_requested",
        }
    }
}

impl TryFrom<&str> for CompletionStatus {
    type Error = ParseCompletionStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "not_submitted" => Ok(Self::NotSubmitted),
            "pending_review" => Ok(Self::PendingReview),
            "approved" => Ok(Self::Approved),
            "changes_requested" => Ok(Self::ChangesRequested),
            _ => Err(ParseCompletionStatusError(value.to_owned())),
        }
    }
}

/// Reviewer feedback attached when a completion is sent back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionFeedback(String);

impl CompletionFeedback {
    /// Creates validated feedback of at least `minimum` trimmed characters.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::FeedbackTooShort`] when the trimmed text is
    /// shorter than `minimum`.
    pub fn new(text: impl Into<String>, minimum: usize) -> Result<Self, TeamDomainError> {
        let raw = text.into();
        let trimmed = raw.trim();
        let actual = trimmed.chars().count();
        if actual < minimum {
            return Err(TeamDomainError::FeedbackTooShort { minimum, actual });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the feedback text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The assignment-related fields of a task, captured before a handoff so it
/// can be undone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentState {
    /// Assignee at capture time.
    pub assignee: MemberId,
    /// Handoff document at capture time.
    pub handoff_doc: Option<String>,
    /// At-risk flag at capture time.
    pub is_at_risk: bool,
}

/// Parameters for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskParams {
    /// Short task title.
    pub title: String,
    /// Longer description.
    pub description: String,
    /// Member the task is assigned to.
    pub assignee: MemberId,
    /// Task priority.
    pub priority: TaskPriority,
    /// Calendar due date.
    pub deadline: NaiveDate,
    /// Project tag.
    pub project: String,
    /// Skill tag the work requires, if any.
    pub skill_required: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl TaskParams {
    /// Creates task parameters with the required fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        assignee: MemberId,
        priority: TaskPriority,
        deadline: NaiveDate,
        project: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            assignee,
            priority,
            deadline,
            project: project.into(),
            skill_required: None,
            notes: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the required skill tag.
    #[must_use]
    pub fn with_skill_required(mut self, skill: impl Into<String>) -> Self {
        self.skill_required = Some(skill.into());
        self
    }

    /// Sets free-text notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    assignee: MemberId,
    creator: MemberId,
    priority: TaskPriority,
    status: TaskStatus,
    deadline: NaiveDate,
    project: String,
    skill_required: Option<String>,
    notes: Option<String>,
    handoff_doc: Option<String>,
    is_at_risk: bool,
    completion_status: CompletionStatus,
    completion_feedback: Option<CompletionFeedback>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `todo` task.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::EmptyTaskTitle`] or
    /// [`TeamDomainError::EmptyProjectTag`] when either is blank.
    pub fn new(
        params: TaskParams,
        creator: MemberId,
        clock: &impl Clock,
    ) -> Result<Self, TeamDomainError> {
        let title = params.title.trim().to_owned();
        if title.is_empty() {
            return Err(TeamDomainError::EmptyTaskTitle);
        }
        let project = params.project.trim().to_owned();
        if project.is_empty() {
            return Err(TeamDomainError::EmptyProjectTag);
        }
        let skill_required = params
            .skill_required
            .map(|skill| skill.trim().to_lowercase())
            .filter(|skill| !skill.is_empty());

        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            title,
            description: params.description,
            assignee: params.assignee,
            creator,
            priority: params.priority,
            status: TaskStatus::Todo,
            deadline: params.deadline,
            project,
            skill_required,
            notes: params.notes,
            handoff_doc: None,
            is_at_risk: false,
            completion_status: CompletionStatus::NotSubmitted,
            completion_feedback: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the current assignee.
    #[must_use]
    pub const fn assignee(&self) -> MemberId {
        self.assignee
    }

    /// Returns the member who created the task.
    #[must_use]
    pub const fn creator(&self) -> MemberId {
        self.creator
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the work status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the due date.
    #[must_use]
    pub const fn deadline(&self) -> NaiveDate {
        self.deadline
    }

    /// Returns the project tag.
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Returns the normalized required skill tag, if any.
    #[must_use]
    pub fn skill_required(&self) -> Option<&str> {
        self.skill_required.as_deref()
    }

    /// Returns the free-text notes, if any.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns the handoff document written at the last reassignment.
    #[must_use]
    pub fn handoff_doc(&self) -> Option<&str> {
        self.handoff_doc.as_deref()
    }

    /// Returns whether the task is flagged at risk.
    #[must_use]
    pub const fn is_at_risk(&self) -> bool {
        self.is_at_risk
    }

    /// Returns the completion review state.
    #[must_use]
    pub const fn completion_status(&self) -> CompletionStatus {
        self.completion_status
    }

    /// Returns the last completion feedback, if any.
    #[must_use]
    pub const fn completion_feedback(&self) -> Option<&CompletionFeedback> {
        self.completion_feedback.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` unless the task is done.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// Sets the work status.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        self.touch(clock);
    }

    /// Raises the at-risk flag.
    pub fn mark_at_risk(&mut self, clock: &impl Clock) {
        self.is_at_risk = true;
        self.touch(clock);
    }

    /// Captures the fields a reassignment overwrites.
    #[must_use]
    pub fn assignment_state(&self) -> AssignmentState {
        AssignmentState {
            assignee: self.assignee,
            handoff_doc: self.handoff_doc.clone(),
            is_at_risk: self.is_at_risk,
        }
    }

    /// Hands the task to a new assignee and clears the at-risk flag.
    pub fn reassign(&mut self, to: MemberId, handoff_doc: impl Into<String>, clock: &impl Clock) {
        self.assignee = to;
        self.handoff_doc = Some(handoff_doc.into());
        self.is_at_risk = false;
        self.touch(clock);
    }

    /// Restores previously captured assignment fields.
    pub fn restore_assignment(&mut self, state: AssignmentState, clock: &impl Clock) {
        self.assignee = state.assignee;
        self.handoff_doc = state.handoff_doc;
        self.is_at_risk = state.is_at_risk;
        self.touch(clock);
    }

    /// Records the assignee's report that the work is finished.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::CompletionAlreadySubmitted`] when a
    /// completion already awaits review.
    pub fn submit_completion(&mut self, clock: &impl Clock) -> Result<(), TeamDomainError> {
        if self.completion_status == CompletionStatus::PendingReview {
            return Err(TeamDomainError::CompletionAlreadySubmitted(self.id));
        }
        self.status = TaskStatus::Done;
        self.completion_status = CompletionStatus::PendingReview;
        self.touch(clock);
        Ok(())
    }

    /// Accepts a pending completion.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::CompletionNotPendingReview`] when no
    /// completion awaits review.
    pub fn approve_completion(&mut self, clock: &impl Clock) -> Result<(), TeamDomainError> {
        self.ensure_pending_review()?;
        self.completion_status = CompletionStatus::Approved;
        self.completion_feedback = None;
        self.touch(clock);
        Ok(())
    }

    /// Sends a pending completion back to the assignee with feedback.
    ///
    /// The task returns to `in_progress` so it counts towards workload again.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::CompletionNotPendingReview`] when no
    /// completion awaits review.
    pub fn request_changes(
        &mut self,
        feedback: CompletionFeedback,
        clock: &impl Clock,
    ) -> Result<(), TeamDomainError> {
        self.ensure_pending_review()?;
        self.status = TaskStatus::InProgress;
        self.completion_status = CompletionStatus::ChangesRequested;
        self.completion_feedback = Some(feedback);
        self.touch(clock);
        Ok(())
    }

    fn ensure_pending_review(&self) -> Result<(), TeamDomainError> {
        if matches!(self.completion_status, CompletionStatus::PendingReview) {
            Ok(())
        } else {
            Err(TeamDomainError::CompletionNotPendingReview(self.id))
        }
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
