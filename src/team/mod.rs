//! Team records: tasks, members, comments, and completion review.
//!
//! This module owns the task and member records that every coverage
//! decision reads, together with the manager-driven task operations around
//! them. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
