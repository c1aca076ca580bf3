//! Port contracts for reassignment storage and suggestion generation.

pub mod generator;
pub mod repository;

pub use generator::{SuggestionGenerator, SuggestionGeneratorError, SuggestionGeneratorResult};
pub use repository::{
    ReassignmentRepository, ReassignmentRepositoryError, ReassignmentRepositoryResult,
};
