//! Coverly: team workload scoring and task coverage.
//!
//! This crate implements the decision core of a team task-management
//! service: it scores each member's live workload, flags tasks that are
//! at risk of slipping, and runs the reassignment workflow that hands
//! at-risk work to another member and can later undo the handoff.
//!
//! # Architecture
//!
//! Coverly follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the document store and the
//!   suggestion generator
//! - **Adapters**: Concrete implementations of ports (in-memory stores, a
//!   deterministic suggestion generator)
//!
//! # Modules
//!
//! - [`team`]: Tasks, members, comments, and completion review
//! - [`availability`]: Unavailability windows and interval-overlap queries
//! - [`workload`]: Workload scoring and risk classification
//! - [`reassignment`]: Suggestion validation and the handoff workflow
//! - [`policy`]: Tunable horizons and validation thresholds

pub mod availability;
pub mod policy;
pub mod reassignment;
pub mod team;
pub mod workload;

#[cfg(test)]
mod test_support;
