//! In-memory storage backend for testing.
//!
//! This module provides an in-memory implementation of `AssignmentRepository`
//! that keeps all assignments in a `Vec` wrapped in `Arc<RwLock<_>>`. This is
//! useful for testing and development scenarios where persistence is not required.
//!
//! # Example
//!
//! ```rust,ignore
//! use assigncache::storage::inmemory::InMemoryAssignmentRepository;
//!
//! let repo = InMemoryAssignmentRepository::new();
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::InMemoryAssignmentRepository;
