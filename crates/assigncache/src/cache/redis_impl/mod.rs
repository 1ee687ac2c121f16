//! Redis cache backend implementation.
//!
//! Provides a distributed cache shared by every instance of the service.
//! Supports connection pooling, TTL, and glob key scans.

mod cache;
mod error;

pub use cache::RedisCache;
