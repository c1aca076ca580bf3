//! Repository port for availability entries.

use crate::availability::domain::{AvailabilityEntry, AvailabilityId, DateRange};
use crate::team::domain::MemberId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for availability repository operations.
pub type AvailabilityRepositoryResult<T> = Result<T, AvailabilityRepositoryError>;

/// Availability persistence contract.
#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// Inserts `entry` after deleting every entry of the same member whose
    /// range overlaps it, and returns the deleted entries.
    ///
    /// Implementations must make the read, delete, and insert one atomic
    /// unit per member so no reader observes two overlapping entries.
    ///
    /// # Errors
    ///
    /// Returns [`AvailabilityRepositoryError::Persistence`] when the store
    /// fails.
    async fn replace_overlapping(
        &self,
        entry: &AvailabilityEntry,
    ) -> AvailabilityRepositoryResult<Vec<AvailabilityEntry>>;

    /// Lists a member's entries ordered by start date.
    async fn list_for_member(
        &self,
        member: MemberId,
    ) -> AvailabilityRepositoryResult<Vec<AvailabilityEntry>>;

    /// Lists a member's entries sharing at least one day with `range`,
    /// ordered by start date.
    async fn find_overlapping(
        &self,
        member: MemberId,
        range: DateRange,
    ) -> AvailabilityRepositoryResult<Vec<AvailabilityEntry>>;

    /// Finds an entry by identifier.
    async fn find_by_id(
        &self,
        id: AvailabilityId,
    ) -> AvailabilityRepositoryResult<Option<AvailabilityEntry>>;

    /// Deletes an entry.
    ///
    /// # Errors
    ///
    /// Returns [`AvailabilityRepositoryError::NotFound`] when the entry does
    /// not exist.
    async fn delete(&self, id: AvailabilityId) -> AvailabilityRepositoryResult<()>;
}

/// Errors returned by availability repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AvailabilityRepositoryError {
    /// The entry was not found.
    #[error("availability entry not found: {0}")]
    NotFound(AvailabilityId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AvailabilityRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
