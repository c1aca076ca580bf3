//! Suggestion Generator payloads: the request the core builds and the
//! untrusted suggestions it receives back.

use super::{CandidateProfile, TaskContext};
use crate::team::domain::{MemberId, TaskId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// Everything a generator is told about one proposal round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionRequest {
    /// Date the request was built; availability is judged from here.
    pub as_of: NaiveDate,
    /// Tasks needing a new assignee.
    pub tasks: Vec<TaskContext>,
    /// Every member considered as a candidate.
    pub candidates: Vec<CandidateProfile>,
}

impl SuggestionRequest {
    /// Finds the context for a task in this request.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&TaskContext> {
        self.tasks.iter().find(|context| context.task.id() == id)
    }

    /// Finds a candidate profile in this request.
    #[must_use]
    pub fn candidate(&self, id: MemberId) -> Option<&CandidateProfile> {
        self.candidates.iter().find(|profile| profile.member == id)
    }
}

/// Generator confidence in `0..=100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Confidence(u8);

impl Confidence {
    /// Highest confidence.
    pub const MAX: Self = Self(100);

    /// Clamps an integer into range.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        let bounded = value.clamp(0, 100);
        Self(u8::try_from(bounded).unwrap_or(100))
    }

    /// Reads a JSON number of any kind, clamping into range and dropping
    /// any fractional part.
    #[must_use]
    pub fn from_number(number: &Number) -> Self {
        if let Some(value) = number.as_i64() {
            return Self::clamped(value);
        }
        if number.as_u64().is_some() {
            return Self::MAX;
        }
        let value = number.as_f64().unwrap_or_default();
        (0_u8..=100)
            .rev()
            .find(|step| value >= f64::from(*step))
            .map_or(Self(0), Self)
    }

    /// Returns the confidence value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// One suggestion exactly as a generator returned it.
///
/// Every field is untrusted: identifiers may be malformed or refer to
/// records that do not exist, and text may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSuggestion {
    /// Claimed task identifier.
    pub task_id: String,
    /// Claimed assignee identifier.
    pub suggested_assignee_id: String,
    /// Why the assignee fits.
    #[serde(default)]
    pub reasoning: String,
    /// Handoff document for the new assignee.
    #[serde(default)]
    pub handoff_doc: String,
    /// Claimed confidence; any JSON number.
    #[serde(default)]
    pub confidence: Option<Number>,
}

impl RawSuggestion {
    /// Creates a raw suggestion from already-known identifiers.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        suggested_assignee_id: MemberId,
        reasoning: impl Into<String>,
        handoff_doc: impl Into<String>,
        confidence: u8,
    ) -> Self {
        Self {
            task_id: task_id.to_string(),
            suggested_assignee_id: suggested_assignee_id.to_string(),
            reasoning: reasoning.into(),
            handoff_doc: handoff_doc.into(),
            confidence: Some(Number::from(confidence)),
        }
    }

    /// Returns the clamped confidence, zero when absent.
    #[must_use]
    pub fn confidence(&self) -> Confidence {
        self.confidence
            .as_ref()
            .map_or_else(Confidence::default, Confidence::from_number)
    }
}

/// A suggestion that passed validation against live state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Task to hand off.
    pub task_id: TaskId,
    /// Current assignee.
    pub from_member: MemberId,
    /// Proposed assignee.
    pub to_member: MemberId,
    /// Why the assignee fits.
    pub reasoning: String,
    /// Handoff document for the new assignee.
    pub handoff_doc: String,
    /// Generator confidence.
    pub confidence: Confidence,
}
