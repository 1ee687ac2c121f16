//! Cached repository decorator.
//!
//! [`CachedAssignmentRepository`] wraps any `AssignmentRepository` with
//! read-through caching:
//!
//! - **Reads**: check the cache first; on a miss fetch from the repository
//!   and populate the cache
//! - **Writes**: invalidate every affected cache entry, then persist
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let repo = Arc::new(InMemoryAssignmentRepository::new());
//! let cache = Arc::new(MemoryCache::new(10_000)?.with_ttl(Duration::from_secs(300)));
//!
//! let cached_repo = CachedAssignmentRepository::builder(repo)
//!     .client(cache)
//!     .cache_timeout(Duration::from_millis(250))
//!     .build()?;
//! ```

mod adapter;
mod assignment;
mod invalidator;

#[cfg(test)]
mod testing;

pub use adapter::CacheAdapter;
pub use assignment::{CachedAssignmentRepository, CachedAssignmentRepositoryBuilder};
pub use invalidator::{embedding_namespaces, Invalidator};
