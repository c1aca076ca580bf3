//! Reassignment workflow: suggestions, approvals, rejections, and reverts.
//!
//! Suggestions are advisory. They come from a [`ports::SuggestionGenerator`]
//! and are validated against live store state before a manager sees them.
//! Nothing is persisted until a manager submits or approves a handoff.
//! Every approval stores the task's prior assignment so the handoff can be
//! undone once. The module follows hexagonal architecture:
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
