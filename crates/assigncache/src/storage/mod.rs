//! Repository implementations.
//!
//! - `inmemory`: `Vec`-backed `AssignmentRepository` for tests and demos
//! - `cached`: the caching decorator over any `AssignmentRepository`

pub mod cached;
pub mod inmemory;

pub use cached::{CachedAssignmentRepository, CachedAssignmentRepositoryBuilder};
pub use inmemory::InMemoryAssignmentRepository;
