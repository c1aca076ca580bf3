//! Availability entries and the inclusive date ranges they cover.

use super::{AvailabilityDomainError, AvailabilityId, ParseAvailabilityKindError};
use crate::team::domain::MemberId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How unavailable a member is during an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityKind {
    /// Out of office.
    Ooo,
    /// Reduced hours. Shown to managers but does not block assignment.
    Partial,
    /// Working but cannot take more.
    AtCapacity,
}

impl AvailabilityKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ooo => "ooo",
            Self::Partial => "partial",
            Self::AtCapacity => "at_capacity",
        }
    }

    /// Returns `true` when the member counts as unavailable for gating.
    #[must_use]
    pub const fn blocks_assignment(self) -> bool {
        matches!(self, Self::Ooo | Self::AtCapacity)
    }
}

impl fmt::Display for AvailabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AvailabilityKind {
    type Error = ParseAvailabilityKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "ooo" => Ok(Self::Ooo),
            "partial" => Ok(Self::Partial),
            "at_capacity" => Ok(Self::AtCapacity),
            _ => Err(ParseAvailabilityKindError(value.to_owned())),
        }
    }
}

/// Inclusive calendar date range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a validated range.
    ///
    /// # Errors
    ///
    /// Returns [`AvailabilityDomainError::InvalidDateRange`] when `end` is
    /// before `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AvailabilityDomainError> {
        if end < start {
            return Err(AvailabilityDomainError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a range covering exactly one day.
    #[must_use]
    pub const fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Returns the first day.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the last day.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns `true` when `date` falls inside the range, ends included.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns `true` when the two ranges share at least one day.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && self.end >= other.start
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// A date-range unavailability declaration for one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityEntry {
    id: AvailabilityId,
    member: MemberId,
    kind: AvailabilityKind,
    range: DateRange,
    note: Option<String>,
    created_at: DateTime<Utc>,
}

impl AvailabilityEntry {
    /// Creates an entry for `member` covering `range`.
    #[must_use]
    pub fn new(
        member: MemberId,
        kind: AvailabilityKind,
        range: DateRange,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: AvailabilityId::new(),
            member,
            kind,
            range,
            note: None,
            created_at: clock.utc(),
        }
    }

    /// Attaches a free-text note. Blank notes are dropped.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let text = note.into();
        let trimmed = text.trim();
        self.note = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> AvailabilityId {
        self.id
    }

    /// Returns the member the entry belongs to.
    #[must_use]
    pub const fn member(&self) -> MemberId {
        self.member
    }

    /// Returns the declared kind.
    #[must_use]
    pub const fn kind(&self) -> AvailabilityKind {
        self.kind
    }

    /// Returns the covered range.
    #[must_use]
    pub const fn range(&self) -> DateRange {
        self.range
    }

    /// Returns the note, if any.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A member's availability on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "kind")]
pub enum AvailabilityStatus {
    /// No entry covers the date.
    Available,
    /// An entry of the given kind covers the date.
    Declared(AvailabilityKind),
}

impl AvailabilityStatus {
    /// Returns `true` for `ooo` and `at_capacity`; `partial` does not count.
    #[must_use]
    pub const fn is_unavailable(self) -> bool {
        match self {
            Self::Available => false,
            Self::Declared(kind) => kind.blocks_assignment(),
        }
    }

    /// Returns the declared kind, if any.
    #[must_use]
    pub const fn kind(self) -> Option<AvailabilityKind> {
        match self {
            Self::Available => None,
            Self::Declared(kind) => Some(kind),
        }
    }
}
