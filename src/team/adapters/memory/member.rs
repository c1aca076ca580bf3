//! In-memory repository for team members.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::team::{
    domain::{ExternalIdentity, Member, MemberId},
    ports::{MemberRepository, MemberRepositoryError, MemberRepositoryResult},
};

/// Thread-safe in-memory member repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMemberRepository {
    state: Arc<RwLock<InMemoryMemberState>>,
}

#[derive(Debug, Default)]
struct InMemoryMemberState {
    members: HashMap<MemberId, Member>,
    identity_index: HashMap<ExternalIdentity, MemberId>,
}

impl InMemoryMemberRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> MemberRepositoryError {
    MemberRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn store(&self, member: &Member) -> MemberRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.members.contains_key(&member.id()) {
            return Err(MemberRepositoryError::DuplicateMember(member.id()));
        }
        if state.identity_index.contains_key(member.external_id()) {
            return Err(MemberRepositoryError::DuplicateExternalIdentity(
                member.external_id().clone(),
            ));
        }
        state
            .identity_index
            .insert(member.external_id().clone(), member.id());
        state.members.insert(member.id(), member.clone());
        Ok(())
    }

    async fn update(&self, member: &Member) -> MemberRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let old_identity = state
            .members
            .get(&member.id())
            .ok_or(MemberRepositoryError::NotFound(member.id()))?
            .external_id()
            .clone();

        if *member.external_id() != old_identity {
            if let Some(&indexed_id) = state.identity_index.get(member.external_id())
                && indexed_id != member.id()
            {
                return Err(MemberRepositoryError::DuplicateExternalIdentity(
                    member.external_id().clone(),
                ));
            }
            state.identity_index.remove(&old_identity);
            state
                .identity_index
                .insert(member.external_id().clone(), member.id());
        }
        state.members.insert(member.id(), member.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: MemberId) -> MemberRepositoryResult<Option<Member>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.members.get(&id).cloned())
    }

    async fn find_by_external_id(
        &self,
        external_id: &ExternalIdentity,
    ) -> MemberRepositoryResult<Option<Member>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .identity_index
            .get(external_id)
            .and_then(|id| state.members.get(id))
            .cloned())
    }

    async fn list_all(&self) -> MemberRepositoryResult<Vec<Member>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut members: Vec<Member> = state.members.values().cloned().collect();
        members.sort_by(|a, b| {
            a.display_name()
                .cmp(b.display_name())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(members)
    }
}
