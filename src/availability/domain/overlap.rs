//! Pure interval queries over a member's entries.

use super::{AvailabilityEntry, AvailabilityStatus, DateRange};
use chrono::NaiveDate;

/// Returns the status on `date` given one member's entries.
///
/// Entries never overlap once stored, so the first covering entry is the
/// only one.
#[must_use]
pub fn status_on(entries: &[AvailabilityEntry], date: NaiveDate) -> AvailabilityStatus {
    entries
        .iter()
        .find(|entry| entry.range().contains(date))
        .map_or(AvailabilityStatus::Available, |entry| {
            AvailabilityStatus::Declared(entry.kind())
        })
}

/// Returns the entries sharing at least one day with `range`.
pub fn overlapping<'a>(
    entries: &'a [AvailabilityEntry],
    range: &'a DateRange,
) -> impl Iterator<Item = &'a AvailabilityEntry> + 'a {
    entries
        .iter()
        .filter(move |entry| entry.range().overlaps(range))
}
