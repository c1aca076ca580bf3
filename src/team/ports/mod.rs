//! Port contracts for team records.
//!
//! Ports define store-agnostic interfaces used by the team, workload, and
//! reassignment services.

pub mod member;
pub mod task;

pub use member::{MemberRepository, MemberRepositoryError, MemberRepositoryResult};
pub use task::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
