//! Adapter implementations for reassignment ports.

pub mod heuristic;
pub mod memory;

pub use heuristic::HeuristicSuggestionGenerator;
