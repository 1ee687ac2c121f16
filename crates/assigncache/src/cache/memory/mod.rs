//! In-memory cache backend implementation.
//!
//! Suitable for single-instance deployments and tests.

mod cache;

pub use cache::MemoryCache;
