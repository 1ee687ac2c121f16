mod error;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use traits::AssignmentRepository;
pub use types::Page;
