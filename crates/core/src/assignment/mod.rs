mod error;
mod operations;
mod types;

pub use error::{AssignmentError, IdError};
pub use operations::{
    filter_assignments_by_resource, filter_assignments_by_user, paginate, validate_assignment,
};
pub use types::{Assignment, AssignmentKind, EntityKind, Id};
