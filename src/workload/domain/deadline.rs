//! Deadline distance measured against wall-clock time.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Time from `now` until UTC midnight at the start of `deadline`.
///
/// Negative when the deadline has passed.
#[must_use]
pub fn time_until_deadline(deadline: NaiveDate, now: DateTime<Utc>) -> TimeDelta {
    deadline.and_time(NaiveTime::MIN).and_utc() - now
}

/// Returns `true` when the deadline is at most `days` away.
///
/// Overdue deadlines are within every horizon.
#[must_use]
pub fn is_within_days(deadline: NaiveDate, now: DateTime<Utc>, days: i64) -> bool {
    let remaining = time_until_deadline(deadline, now);
    TimeDelta::try_days(days).is_none_or(|horizon| remaining <= horizon)
}

/// Urgency band of a deadline, which scales a task's contribution to
/// workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineUrgency {
    /// More than a week away.
    Later,
    /// Within seven days.
    ThisWeek,
    /// Within three days.
    Soon,
    /// Within a day, or overdue.
    Imminent,
}

impl DeadlineUrgency {
    /// Classifies a deadline relative to `now`.
    #[must_use]
    pub fn classify(deadline: NaiveDate, now: DateTime<Utc>) -> Self {
        if is_within_days(deadline, now, 1) {
            Self::Imminent
        } else if is_within_days(deadline, now, 3) {
            Self::Soon
        } else if is_within_days(deadline, now, 7) {
            Self::ThisWeek
        } else {
            Self::Later
        }
    }

    /// Multiplier expressed in halves: ×3, ×2, ×1.5, and ×1 become 6, 4, 3,
    /// and 2.
    #[must_use]
    pub const fn multiplier_halves(self) -> u32 {
        match self {
            Self::Imminent => 6,
            Self::Soon => 4,
            Self::ThisWeek => 3,
            Self::Later => 2,
        }
    }
}
