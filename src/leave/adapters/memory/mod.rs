//! In-memory adapter for leave persistence.

mod leave;

pub use leave::InMemoryLeaveRepository;
