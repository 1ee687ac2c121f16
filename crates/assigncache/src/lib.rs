//! Read-through cache for assignment reads.
//!
//! Wraps an [`AssignmentRepository`] with a cache that serves repeated reads
//! and is purged before every mutation. Cache backends live in [`cache`],
//! repositories (including the caching decorator) in [`storage`].
//!
//! [`AssignmentRepository`]: assigncache_core::storage::AssignmentRepository

pub mod cache;
pub mod config;
pub mod storage;

pub use config::Config;
pub use storage::{
    CachedAssignmentRepository, CachedAssignmentRepositoryBuilder, InMemoryAssignmentRepository,
};
