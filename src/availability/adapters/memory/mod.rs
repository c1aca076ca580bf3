//! In-memory availability adapter.

mod repository;

pub use repository::InMemoryAvailabilityRepository;
