//! In-memory repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use assigncache_core::assignment::{
    filter_assignments_by_resource, filter_assignments_by_user, paginate, validate_assignment,
    Assignment, Id,
};
use assigncache_core::storage::{AssignmentRepository, Page, RepositoryError, Result};

/// In-memory storage backend for testing.
///
/// Assignments are kept in insertion order, which is the order list reads
/// return them in. Data is not persisted and will be lost when the repository
/// is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssignmentRepository {
    assignments: Arc<RwLock<Vec<Assignment>>>,
}

impl InMemoryAssignmentRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored assignments.
    pub async fn len(&self) -> usize {
        self.assignments.read().await.len()
    }

    /// Returns true if the store holds no assignments.
    pub async fn is_empty(&self) -> bool {
        self.assignments.read().await.is_empty()
    }
}

fn not_found(id: Id) -> RepositoryError {
    RepositoryError::NotFound {
        entity_type: "Assignment",
        id: id.to_string(),
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryAssignmentRepository {
    async fn get(&self, id: Id) -> Result<Assignment> {
        let assignments = self.assignments.read().await;
        assignments
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn get_by_user(&self, user: Id, page: Page) -> Result<Vec<Assignment>> {
        let assignments = self.assignments.read().await;
        Ok(paginate(filter_assignments_by_user(&assignments, user), page))
    }

    async fn get_by_resource(&self, resource: Id, page: Page) -> Result<Vec<Assignment>> {
        let assignments = self.assignments.read().await;
        Ok(paginate(
            filter_assignments_by_resource(&assignments, resource),
            page,
        ))
    }

    async fn create(&self, assignment: &Assignment) -> Result<()> {
        validate_assignment(assignment).map_err(|e| RepositoryError::InvalidData(e.to_string()))?;

        let mut assignments = self.assignments.write().await;
        if assignments.iter().any(|a| a.id == assignment.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Assignment",
                id: assignment.id.to_string(),
            });
        }
        assignments.push(assignment.clone());
        Ok(())
    }

    async fn delete(&self, id: Id) -> Result<()> {
        let mut assignments = self.assignments.write().await;
        let before = assignments.len();
        assignments.retain(|a| a.id != id);
        if assignments.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}
