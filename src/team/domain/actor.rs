//! Explicit acting identity passed into every mutating operation.

use super::{Member, MemberId, MemberRole};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The member performing an operation and the role they act in.
///
/// Callers resolve the authenticated user into an `Actor` once, at the
/// edge, and pass it down; the core never reads ambient request state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    /// Acting member.
    pub member_id: MemberId,
    /// Role the member acts in.
    pub role: MemberRole,
}

impl Actor {
    /// Creates an actor acting as a manager.
    #[must_use]
    pub const fn manager(member_id: MemberId) -> Self {
        Self {
            member_id,
            role: MemberRole::Manager,
        }
    }

    /// Creates an actor acting as a regular member.
    #[must_use]
    pub const fn member(member_id: MemberId) -> Self {
        Self {
            member_id,
            role: MemberRole::Member,
        }
    }

    /// Returns `true` when the actor holds the manager role.
    #[must_use]
    pub const fn is_manager(&self) -> bool {
        matches!(self.role, MemberRole::Manager)
    }

    /// Returns `true` when the actor is the given member or a manager.
    #[must_use]
    pub fn acts_for(&self, member_id: MemberId) -> bool {
        self.is_manager() || self.member_id == member_id
    }

    /// Checks that the actor is a manager.
    ///
    /// # Errors
    ///
    /// Returns [`NotAuthorized`] naming `action` when the actor is not a
    /// manager.
    pub const fn ensure_manager(&self, action: &'static str) -> Result<(), NotAuthorized> {
        if self.is_manager() {
            Ok(())
        } else {
            Err(NotAuthorized {
                member_id: self.member_id,
                action,
            })
        }
    }

    /// Checks that the actor is the given member or a manager.
    ///
    /// # Errors
    ///
    /// Returns [`NotAuthorized`] naming `action` otherwise.
    pub fn ensure_acts_for(
        &self,
        member_id: MemberId,
        action: &'static str,
    ) -> Result<(), NotAuthorized> {
        if self.acts_for(member_id) {
            Ok(())
        } else {
            Err(NotAuthorized {
                member_id: self.member_id,
                action,
            })
        }
    }
}

/// Error returned when an actor may not perform an action.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("member {member_id} is not allowed to {action}")]
pub struct NotAuthorized {
    /// Acting member.
    pub member_id: MemberId,
    /// Attempted action.
    pub action: &'static str,
}

impl From<&Member> for Actor {
    fn from(member: &Member) -> Self {
        Self {
            member_id: member.id(),
            role: member.role(),
        }
    }
}
