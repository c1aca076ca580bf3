//! Step definitions for coverage workflow scenarios.

pub mod world;

mod given;
mod then;
mod when;
