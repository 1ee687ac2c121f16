use async_trait::async_trait;

use crate::assignment::{Assignment, Id};

use super::{Page, Result};

/// Repository for assignment operations.
///
/// Implemented by authoritative stores and by the caching decorator that
/// wraps them, so callers never need to know which one they hold.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Gets an assignment by its ID.
    ///
    /// Returns `RepositoryError::NotFound` when no such assignment exists.
    async fn get(&self, id: Id) -> Result<Assignment>;

    /// Gets a page of the assignments held by a user.
    async fn get_by_user(&self, user: Id, page: Page) -> Result<Vec<Assignment>>;

    /// Gets a page of the assignments attached to a resource.
    async fn get_by_resource(&self, resource: Id, page: Page) -> Result<Vec<Assignment>>;

    /// Creates a new assignment.
    async fn create(&self, assignment: &Assignment) -> Result<()>;

    /// Deletes an assignment by its ID.
    async fn delete(&self, id: Id) -> Result<()>;
}
