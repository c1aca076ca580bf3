//! Workload scoring and at-risk classification.
//!
//! Scores are always computed live from a member's open tasks; the value
//! cached on [`crate::team::domain::Member`] is for display only. The risk
//! classifier combines the live score, the task's own state, and the
//! assignee's availability.
//!
//! - Pure scoring and classification rules in [`domain`]
//! - Orchestration over the team and availability stores in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
