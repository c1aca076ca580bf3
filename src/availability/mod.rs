//! Member availability windows and the interval-overlap engine.
//!
//! A member declares date ranges during which they are out of office,
//! partially available, or at capacity. At most one entry covers any given
//! date for a member: a new declaration replaces every entry it overlaps.
//! The module follows hexagonal architecture:
//!
//! - Domain types and overlap queries in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
