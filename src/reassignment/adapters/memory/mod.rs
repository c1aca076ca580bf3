//! In-memory reassignment adapter.

mod repository;

pub use repository::InMemoryReassignmentRepository;
