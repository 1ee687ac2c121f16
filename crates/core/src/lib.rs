//! Pure building blocks for the assignment cache.
//!
//! This crate holds the domain types, the cache key grammar, and the traits
//! that backends and stores implement. It performs no I/O.

pub mod assignment;
pub mod cache;
pub mod storage;
