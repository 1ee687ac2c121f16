use super::error::AssignmentError;
use super::types::{Assignment, EntityKind, Id};
use crate::storage::Page;

/// Filters assignments held by a user, preserving input order.
pub fn filter_assignments_by_user(assignments: &[Assignment], user: Id) -> Vec<&Assignment> {
    assignments.iter().filter(|a| a.user == user).collect()
}

/// Filters assignments attached to a resource, preserving input order.
pub fn filter_assignments_by_resource(
    assignments: &[Assignment],
    resource: Id,
) -> Vec<&Assignment> {
    assignments.iter().filter(|a| a.resource == resource).collect()
}

/// Applies a page window to an ordered list of assignments.
pub fn paginate(assignments: Vec<&Assignment>, page: Page) -> Vec<Assignment> {
    assignments
        .into_iter()
        .skip(page.offset)
        .take(page.limit)
        .cloned()
        .collect()
}

/// Validates an assignment before creation.
///
/// The resource kind is not checked here; resources of any kind may be stored,
/// but only documents and issues can be invalidated by the cache layer.
pub fn validate_assignment(assignment: &Assignment) -> Result<(), AssignmentError> {
    if !assignment.id.is_kind(EntityKind::Assignment) {
        return Err(AssignmentError::InvalidId(assignment.id.kind));
    }
    if !assignment.user.is_kind(EntityKind::User) {
        return Err(AssignmentError::InvalidUser(assignment.user.kind));
    }
    Ok(())
}
