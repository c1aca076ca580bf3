//! Error types for availability validation and parsing.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing availability values.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AvailabilityDomainError {
    /// The range ends before it starts.
    #[error("date range ends on {end} before it starts on {start}")]
    InvalidDateRange {
        /// First day of the range.
        start: NaiveDate,
        /// Last day of the range.
        end: NaiveDate,
    },
}

/// Error returned while parsing availability kinds from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown availability kind: {0}")]
pub struct ParseAvailabilityKindError(pub String);
