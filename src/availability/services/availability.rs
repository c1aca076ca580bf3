//! Availability declaration and overlap queries.

use crate::availability::{
    domain::{
        AvailabilityDomainError, AvailabilityEntry, AvailabilityId, AvailabilityKind,
        AvailabilityStatus, DateRange, ParseAvailabilityKindError, status_on,
    },
    ports::{AvailabilityRepository, AvailabilityRepositoryError},
};
use crate::team::{
    domain::{Actor, MemberId, NotAuthorized},
    ports::{MemberRepository, MemberRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Request payload for declaring unavailability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclareAvailabilityRequest {
    member: MemberId,
    kind: String,
    start: NaiveDate,
    end: NaiveDate,
    note: Option<String>,
}

impl DeclareAvailabilityRequest {
    /// Creates a request covering `start..=end`.
    ///
    /// `kind` is parsed from its storage form (`ooo`, `partial`,
    /// `at_capacity`).
    #[must_use]
    pub fn new(
        member: MemberId,
        kind: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            member,
            kind: kind.into(),
            start,
            end,
            note: None,
        }
    }

    /// Attaches a note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Outcome of a declaration: the stored entry and the entries it replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Newly stored entry.
    pub entry: AvailabilityEntry,
    /// Entries removed because they overlapped the new one.
    pub replaced: Vec<AvailabilityEntry>,
}

/// Service-level errors for availability operations.
#[derive(Debug, Error)]
pub enum AvailabilityServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] AvailabilityDomainError),
    /// The kind string is not a known kind.
    #[error(transparent)]
    InvalidKind(#[from] ParseAvailabilityKindError),
    /// The actor may not perform the operation.
    #[error(transparent)]
    NotAuthorized(#[from] NotAuthorized),
    /// The member does not exist.
    #[error("member not found: {0}")]
    MemberNotFound(MemberId),
    /// The entry does not exist.
    #[error("availability entry not found: {0}")]
    EntryNotFound(AvailabilityId),
    /// Availability repository operation failed.
    #[error(transparent)]
    Repository(#[from] AvailabilityRepositoryError),
    /// Member repository operation failed.
    #[error(transparent)]
    Members(#[from] MemberRepositoryError),
}

/// Result type for availability service operations.
pub type AvailabilityServiceResult<T> = Result<T, AvailabilityServiceError>;

/// Availability orchestration service.
pub struct AvailabilityService<A, M, C>
where
    A: AvailabilityRepository,
    M: MemberRepository,
    C: Clock + Send + Sync,
{
    entries: Arc<A>,
    members: Arc<M>,
    clock: Arc<C>,
}

impl<A, M, C> AvailabilityService<A, M, C>
where
    A: AvailabilityRepository,
    M: MemberRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new availability service.
    #[must_use]
    pub const fn new(entries: Arc<A>, members: Arc<M>, clock: Arc<C>) -> Self {
        Self {
            entries,
            members,
            clock,
        }
    }

    /// Declares unavailability, replacing every overlapping entry.
    ///
    /// The member may declare for themselves; a manager may declare on
    /// anyone's behalf.
    ///
    /// # Errors
    ///
    /// Returns [`AvailabilityServiceError`] when the kind or range is
    /// invalid, the actor may not act for the member, the member does not
    /// exist, or the store fails.
    pub async fn declare(
        &self,
        actor: Actor,
        request: DeclareAvailabilityRequest,
    ) -> AvailabilityServiceResult<Declaration> {
        let DeclareAvailabilityRequest {
            member,
            kind,
            start,
            end,
            note,
        } = request;
        actor.ensure_acts_for(member, "declare availability")?;
        let parsed_kind = AvailabilityKind::try_from(kind.as_str())?;
        let range = DateRange::new(start, end)?;
        if self.members.find_by_id(member).await?.is_none() {
            return Err(AvailabilityServiceError::MemberNotFound(member));
        }

        let mut entry = AvailabilityEntry::new(member, parsed_kind, range, &*self.clock);
        if let Some(text) = note {
            entry = entry.with_note(text);
        }
        let replaced = self.entries.replace_overlapping(&entry).await?;
        if !replaced.is_empty() {
            debug!(
                member = %member,
                range = %range,
                replaced = replaced.len(),
                "availability declaration replaced overlapping entries"
            );
        }
        Ok(Declaration { entry, replaced })
    }

    /// Returns the member's status on `date`.
    ///
    /// # Errors
    ///
    /// Returns [`AvailabilityServiceError::Repository`] when the lookup
    /// fails.
    pub async fn status_on_date(
        &self,
        member: MemberId,
        date: NaiveDate,
    ) -> AvailabilityServiceResult<AvailabilityStatus> {
        let covering = self
            .entries
            .find_overlapping(member, DateRange::single_day(date))
            .await?;
        Ok(status_on(&covering, date))
    }

    /// Lists the member's entries sharing at least one day with
    /// `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns [`AvailabilityServiceError::Domain`] when `end` is before
    /// `start`, or [`AvailabilityServiceError::Repository`] when the lookup
    /// fails.
    pub async fn entries_overlapping_range(
        &self,
        member: MemberId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AvailabilityServiceResult<Vec<AvailabilityEntry>> {
        let range = DateRange::new(start, end)?;
        Ok(self.entries.find_overlapping(member, range).await?)
    }

    /// Returns `true` when the member is out of office or at capacity on
    /// `date`.
    ///
    /// # Errors
    ///
    /// Returns [`AvailabilityServiceError::Repository`] when the lookup
    /// fails.
    pub async fn is_unavailable(
        &self,
        member: MemberId,
        date: NaiveDate,
    ) -> AvailabilityServiceResult<bool> {
        Ok(self.status_on_date(member, date).await?.is_unavailable())
    }

    /// Lists every entry for a member.
    ///
    /// # Errors
    ///
    /// Returns [`AvailabilityServiceError::Repository`] when the lookup
    /// fails.
    pub async fn list_for_member(
        &self,
        member: MemberId,
    ) -> AvailabilityServiceResult<Vec<AvailabilityEntry>> {
        Ok(self.entries.list_for_member(member).await?)
    }

    /// Removes an entry.
    ///
    /// # Errors
    ///
    /// Returns [`AvailabilityServiceError`] when the entry does not exist,
    /// the actor may not act for its member, or the store fails.
    pub async fn remove(&self, actor: Actor, id: AvailabilityId) -> AvailabilityServiceResult<()> {
        let entry = self
            .entries
            .find_by_id(id)
            .await?
            .ok_or(AvailabilityServiceError::EntryNotFound(id))?;
        actor.ensure_acts_for(entry.member(), "remove availability")?;
        self.entries.delete(id).await?;
        Ok(())
    }
}
