//! Repository port for member persistence and lookup.

use crate::team::domain::{ExternalIdentity, Member, MemberId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for member repository operations.
pub type MemberRepositoryResult<T> = Result<T, MemberRepositoryError>;

/// Member persistence contract.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Stores a new member.
    ///
    /// # Errors
    ///
    /// Returns [`MemberRepositoryError::DuplicateMember`] when the ID exists or
    /// [`MemberRepositoryError::DuplicateExternalIdentity`] when the identity
    /// is already linked to a member.
    async fn store(&self, member: &Member) -> MemberRepositoryResult<()>;

    /// Replaces an existing member.
    ///
    /// # Errors
    ///
    /// Returns [`MemberRepositoryError::NotFound`] when the member does not
    /// exist.
    async fn update(&self, member: &Member) -> MemberRepositoryResult<()>;

    /// Finds a member by identifier.
    async fn find_by_id(&self, id: MemberId) -> MemberRepositoryResult<Option<Member>>;

    /// Finds a member by identity-provider reference.
    async fn find_by_external_id(
        &self,
        external_id: &ExternalIdentity,
    ) -> MemberRepositoryResult<Option<Member>>;

    /// Returns every member of the team.
    async fn list_all(&self) -> MemberRepositoryResult<Vec<Member>>;
}

/// Errors returned by member repository implementations.
#[derive(Debug, Clone, Error)]
pub enum MemberRepositoryError {
    /// A member with the same identifier already exists.
    #[error("duplicate member identifier: {0}")]
    DuplicateMember(MemberId),

    /// Another member is already linked to the identity.
    #[error("duplicate external identity: {0}")]
    DuplicateExternalIdentity(ExternalIdentity),

    /// The member was not found.
    #[error("member not found: {0}")]
    NotFound(MemberId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MemberRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
