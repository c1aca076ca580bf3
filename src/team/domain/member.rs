//! Team member aggregate.

use super::{ExternalIdentity, MemberId, ParseMemberRoleError, TeamDomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Role a member plays in the team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// Creates work, reviews completions, and approves reassignments.
    Manager,
    /// Holds tasks.
    Member,
}

impl MemberRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for MemberRole {
    type Error = ParseMemberRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "manager" => Ok(Self::Manager),
            "member" => Ok(Self::Member),
            _ => Err(ParseMemberRoleError(value.to_owned())),
        }
    }
}

/// Parameters for creating a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberParams {
    /// Identity-provider reference.
    pub external_id: String,
    /// Display name.
    pub display_name: String,
    /// Email address.
    pub email: String,
    /// Team role.
    pub role: MemberRole,
    /// Skill tags.
    pub skills: Vec<String>,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// Organization affiliations.
    pub organizations: Vec<String>,
}

impl MemberParams {
    /// Creates member parameters with the required fields.
    #[must_use]
    pub fn new(
        external_id: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
        role: MemberRole,
    ) -> Self {
        Self {
            external_id: external_id.into(),
            display_name: display_name.into(),
            email: email.into(),
            role,
            skills: Vec::new(),
            avatar_url: None,
            organizations: Vec::new(),
        }
    }

    /// Sets skill tags.
    #[must_use]
    pub fn with_skills<S: Into<String>>(mut self, skills: impl IntoIterator<Item = S>) -> Self {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the avatar URL.
    #[must_use]
    pub fn with_avatar_url(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    /// Sets organization affiliations.
    #[must_use]
    pub fn with_organizations<S: Into<String>>(
        mut self,
        organizations: impl IntoIterator<Item = S>,
    ) -> Self {
        self.organizations = organizations.into_iter().map(Into::into).collect();
        self
    }
}

/// A person who can hold tasks.
///
/// `cached_workload` is advisory only. Decisions recompute the score from
/// the member's open tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    id: MemberId,
    external_id: ExternalIdentity,
    display_name: String,
    email: String,
    role: MemberRole,
    skills: BTreeSet<String>,
    cached_workload: u8,
    avatar_url: Option<String>,
    organizations: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Member {
    /// Creates a validated member.
    ///
    /// Skill tags are trimmed, lowercased, and deduplicated.
    ///
    /// # Errors
    ///
    /// Returns a [`TeamDomainError`] when the identity, display name, or
    /// email is invalid.
    pub fn new(params: MemberParams, clock: &impl Clock) -> Result<Self, TeamDomainError> {
        let external_id = ExternalIdentity::new(params.external_id)?;
        let display_name = params.display_name.trim().to_owned();
        if display_name.is_empty() {
            return Err(TeamDomainError::EmptyDisplayName);
        }
        let email = params.email.trim().to_owned();
        if !is_plausible_email(&email) {
            return Err(TeamDomainError::InvalidEmail(params.email));
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: MemberId::new(),
            external_id,
            display_name,
            email,
            role: params.role,
            skills: params
                .skills
                .iter()
                .map(|skill| normalize_skill(skill))
                .filter(|skill| !skill.is_empty())
                .collect(),
            cached_workload: 0,
            avatar_url: params.avatar_url,
            organizations: params.organizations,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Returns the member identifier.
    #[must_use]
    pub const fn id(&self) -> MemberId {
        self.id
    }

    /// Returns the identity-provider reference.
    #[must_use]
    pub const fn external_id(&self) -> &ExternalIdentity {
        &self.external_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the team role.
    #[must_use]
    pub const fn role(&self) -> MemberRole {
        self.role
    }

    /// Returns the normalized skill tags.
    #[must_use]
    pub const fn skills(&self) -> &BTreeSet<String> {
        &self.skills
    }

    /// Returns `true` when the member carries the given skill tag.
    #[must_use]
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.contains(&normalize_skill(skill))
    }

    /// Returns the last persisted workload score.
    #[must_use]
    pub const fn cached_workload(&self) -> u8 {
        self.cached_workload
    }

    /// Returns the avatar URL, if any.
    #[must_use]
    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    /// Returns organization affiliations.
    #[must_use]
    pub fn organizations(&self) -> &[String] {
        &self.organizations
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Stores a freshly computed workload score for display.
    pub fn record_workload(&mut self, score: u8, clock: &impl Clock) {
        self.cached_workload = score;
        self.updated_at = clock.utc();
    }
}

fn normalize_skill(skill: &str) -> String {
    skill.trim().to_lowercase()
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}
