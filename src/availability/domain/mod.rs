//! Domain model for availability declarations.

mod entry;
mod error;
mod ids;
mod overlap;

pub use entry::{AvailabilityEntry, AvailabilityKind, AvailabilityStatus, DateRange};
pub use error::{AvailabilityDomainError, ParseAvailabilityKindError};
pub use ids::AvailabilityId;
pub use overlap::{overlapping, status_on};
