//! Service layer for member registration and identity lookup.

use crate::team::{
    domain::{ExternalIdentity, Member, MemberParams, MemberRole, TeamDomainError},
    ports::{MemberRepository, MemberRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for registering a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterMemberRequest {
    params: MemberParams,
}

impl RegisterMemberRequest {
    /// Creates a request with the required member fields.
    #[must_use]
    pub fn new(
        external_id: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
        role: MemberRole,
    ) -> Self {
        Self {
            params: MemberParams::new(external_id, display_name, email, role),
        }
    }

    /// Sets skill tags.
    #[must_use]
    pub fn with_skills<S: Into<String>>(mut self, skills: impl IntoIterator<Item = S>) -> Self {
        self.params = self.params.with_skills(skills);
        self
    }

    /// Sets organization affiliations.
    #[must_use]
    pub fn with_organizations<S: Into<String>>(
        mut self,
        organizations: impl IntoIterator<Item = S>,
    ) -> Self {
        self.params = self.params.with_organizations(organizations);
        self
    }
}

/// Service-level errors for member operations.
#[derive(Debug, Error)]
pub enum MemberServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TeamDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] MemberRepositoryError),
}

/// Member registration and lookup service.
pub struct MemberService<M, C>
where
    M: MemberRepository,
    C: Clock + Send + Sync,
{
    members: Arc<M>,
    clock: Arc<C>,
}

impl<M, C> MemberService<M, C>
where
    M: MemberRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new member service.
    #[must_use]
    pub const fn new(members: Arc<M>, clock: Arc<C>) -> Self {
        Self { members, clock }
    }

    /// Registers a member.
    ///
    /// # Errors
    ///
    /// Returns [`MemberServiceError`] when validation fails or the identity
    /// is already registered.
    pub async fn register(
        &self,
        request: RegisterMemberRequest,
    ) -> Result<Member, MemberServiceError> {
        let member = Member::new(request.params, &*self.clock)?;
        self.members.store(&member).await?;
        Ok(member)
    }

    /// Resolves the identity provider's user reference into a member.
    ///
    /// # Errors
    ///
    /// Returns [`MemberServiceError`] when the reference is blank or the
    /// lookup fails.
    pub async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<Member>, MemberServiceError> {
        let identity = ExternalIdentity::new(external_id)?;
        Ok(self.members.find_by_external_id(&identity).await?)
    }

    /// Lists every member.
    ///
    /// # Errors
    ///
    /// Returns [`MemberServiceError::Repository`] when the lookup fails.
    pub async fn list(&self) -> Result<Vec<Member>, MemberServiceError> {
        Ok(self.members.list_all().await?)
    }
}
