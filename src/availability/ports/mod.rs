//! Port contracts for availability storage.

pub mod repository;

pub use repository::{
    AvailabilityRepository, AvailabilityRepositoryError, AvailabilityRepositoryResult,
};
