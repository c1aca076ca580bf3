//! In-memory availability repository with per-member atomic replacement.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::availability::{
    domain::{AvailabilityEntry, AvailabilityId, DateRange, overlapping},
    ports::{AvailabilityRepository, AvailabilityRepositoryError, AvailabilityRepositoryResult},
};
use crate::team::domain::MemberId;

/// Thread-safe in-memory availability repository.
///
/// Entries are grouped per member; replacement happens under one write
/// lock, so readers see either the old entries or the new one.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAvailabilityRepository {
    state: Arc<RwLock<HashMap<MemberId, Vec<AvailabilityEntry>>>>,
}

type State = HashMap<MemberId, Vec<AvailabilityEntry>>;

impl InMemoryAvailabilityRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AvailabilityRepositoryResult<RwLockReadGuard<'_, State>> {
        self.state.read().map_err(|err| {
            AvailabilityRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> AvailabilityRepositoryResult<RwLockWriteGuard<'_, State>> {
        self.state.write().map_err(|err| {
            AvailabilityRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn sorted(mut entries: Vec<AvailabilityEntry>) -> Vec<AvailabilityEntry> {
    entries.sort_by_key(|entry| (entry.range().start(), entry.created_at()));
    entries
}

#[async_trait]
impl AvailabilityRepository for InMemoryAvailabilityRepository {
    async fn replace_overlapping(
        &self,
        entry: &AvailabilityEntry,
    ) -> AvailabilityRepositoryResult<Vec<AvailabilityEntry>> {
        let mut state = self.write()?;
        let entries = state.entry(entry.member()).or_default();
        let range = entry.range();
        let (removed, kept): (Vec<_>, Vec<_>) = entries
            .drain(..)
            .partition(|existing| existing.range().overlaps(&range) || existing.id() == entry.id());
        *entries = kept;
        entries.push(entry.clone());
        Ok(sorted(removed))
    }

    async fn list_for_member(
        &self,
        member: MemberId,
    ) -> AvailabilityRepositoryResult<Vec<AvailabilityEntry>> {
        let state = self.read()?;
        Ok(sorted(state.get(&member).cloned().unwrap_or_default()))
    }

    async fn find_overlapping(
        &self,
        member: MemberId,
        range: DateRange,
    ) -> AvailabilityRepositoryResult<Vec<AvailabilityEntry>> {
        let state = self.read()?;
        let found = state
            .get(&member)
            .map(|entries| overlapping(entries, &range).cloned().collect())
            .unwrap_or_default();
        Ok(sorted(found))
    }

    async fn find_by_id(
        &self,
        id: AvailabilityId,
    ) -> AvailabilityRepositoryResult<Option<AvailabilityEntry>> {
        let state = self.read()?;
        Ok(state
            .values()
            .flatten()
            .find(|entry| entry.id() == id)
            .cloned())
    }

    async fn delete(&self, id: AvailabilityId) -> AvailabilityRepositoryResult<()> {
        let mut state = self.write()?;
        for entries in state.values_mut() {
            if let Some(position) = entries.iter().position(|entry| entry.id() == id) {
                entries.remove(position);
                return Ok(());
            }
        }
        Err(AvailabilityRepositoryError::NotFound(id))
    }
}
