//! In-memory team repositories.

mod member;
mod task;

pub use member::InMemoryMemberRepository;
pub use task::InMemoryTaskRepository;
