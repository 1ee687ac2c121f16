mod error;
mod keys;
mod patterns;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{
    all_assignments_by_resource_pattern, all_assignments_by_user_pattern,
    all_assignments_list_pattern, assignment_key, assignments_by_resource_key,
    assignments_by_resource_pattern, assignments_by_user_key, assignments_by_user_pattern,
    assignments_list_key, assignments_list_pattern, compose, namespace_pattern, KeyPart,
    ListMethod, Namespace, KEY_SEPARATOR, WILDCARD,
};
pub use patterns::pattern_matches;
pub use serialization::{deserialize_value, serialize_value, SerializationError};
pub use traits::Cache;
