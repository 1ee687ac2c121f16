use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::IdError;

/// Separator between the kind tag and the opaque value in an identifier's canonical form.
const ID_SEPARATOR: char = '/';

/// The kind tag carried by every typed identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Assignment,
    User,
    Document,
    Issue,
    Project,
}

impl EntityKind {
    /// Returns the tag as it appears in canonical identifiers and cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Assignment => "Assignment",
            EntityKind::User => "User",
            EntityKind::Document => "Document",
            EntityKind::Issue => "Issue",
            EntityKind::Project => "Project",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Assignment" => Ok(EntityKind::Assignment),
            "User" => Ok(EntityKind::User),
            "Document" => Ok(EntityKind::Document),
            "Issue" => Ok(EntityKind::Issue),
            "Project" => Ok(EntityKind::Project),
            other => Err(IdError::UnknownKind(other.to_string())),
        }
    }
}

/// A typed identifier: an opaque value tagged with the kind of entity it names.
///
/// The canonical form is `<Kind>/<uuid>`, e.g. `Issue/550e8400-e29b-41d4-a716-446655440000`.
/// Two identifiers with the same value but different kinds are not equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Id {
    pub kind: EntityKind,
    pub value: Uuid,
}

impl Id {
    /// Creates an identifier from its parts.
    pub fn from_parts(kind: EntityKind, value: Uuid) -> Self {
        Self { kind, value }
    }

    /// Creates a fresh random identifier of the given kind.
    pub fn new(kind: EntityKind) -> Self {
        Self::from_parts(kind, Uuid::new_v4())
    }

    pub fn is_kind(&self, kind: EntityKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.kind, ID_SEPARATOR, self.value)
    }
}

impl FromStr for Id {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, value) = s
            .split_once(ID_SEPARATOR)
            .ok_or_else(|| IdError::Malformed(s.to_string()))?;
        let kind = kind.parse()?;
        let value = Uuid::parse_str(value).map_err(|e| IdError::InvalidValue(e.to_string()))?;
        Ok(Self { kind, value })
    }
}

impl TryFrom<String> for Id {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.to_string()
    }
}

/// The relationship an assignment expresses between a user and a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignmentKind {
    /// The user is responsible for the resource.
    Assignee,
    /// The user reviews the resource.
    Reviewer,
    /// The user follows changes to the resource.
    Watcher,
}

/// Links a user to a document or issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: Id,
    pub kind: AssignmentKind,
    pub user: Id,
    pub resource: Id,
    pub created_at: DateTime<Utc>,
}

impl Assignment {
    /// Creates a new assignment with a fresh id and the current timestamp.
    pub fn new(kind: AssignmentKind, user: Id, resource: Id) -> Self {
        Self {
            id: Id::new(EntityKind::Assignment),
            kind,
            user,
            resource,
            created_at: Utc::now(),
        }
    }

    /// Creates an `Assignee` assignment.
    pub fn assignee(user: Id, resource: Id) -> Self {
        Self::new(AssignmentKind::Assignee, user, resource)
    }

    /// Sets a specific ID for this assignment (useful for testing).
    pub fn with_id(mut self, id: Id) -> Self {
        self.id = id;
        self
    }

    pub fn with_kind(mut self, kind: AssignmentKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the creation timestamp (useful for testing).
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_uuid() -> Uuid {
        Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap()
    }

    #[test]
    fn test_id_canonical_form() {
        let id = Id::from_parts(EntityKind::Issue, test_uuid());
        assert_eq!(id.to_string(), "Issue/550e8400-e29b-41d4-a716-446655440000");
    }

    #[test]
    fn test_id_parse() {
        let id: Id = "Document/550e8400-e29b-41d4-a716-446655440000"
            .parse()
            .unwrap();
        assert_eq!(id.kind, EntityKind::Document);
        assert_eq!(id.value, test_uuid());
    }

    #[test]
    fn test_id_parse_rejects_missing_separator() {
        let result = "550e8400-e29b-41d4-a716-446655440000".parse::<Id>();
        assert!(matches!(result, Err(IdError::Malformed(_))));
    }

    #[test]
    fn test_id_parse_rejects_unknown_kind() {
        let result = "Widget/550e8400-e29b-41d4-a716-446655440000".parse::<Id>();
        assert_eq!(result, Err(IdError::UnknownKind("Widget".to_string())));
    }

    #[test]
    fn test_id_parse_rejects_bad_uuid() {
        let result = "User/not-a-uuid".parse::<Id>();
        assert!(matches!(result, Err(IdError::InvalidValue(_))));
    }

    #[test]
    fn test_kind_is_part_of_equality() {
        let document = Id::from_parts(EntityKind::Document, test_uuid());
        let issue = Id::from_parts(EntityKind::Issue, test_uuid());
        assert_ne!(document, issue);
    }

    #[test]
    fn test_id_serializes_as_canonical_string() {
        let id = Id::from_parts(EntityKind::User, test_uuid());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"User/550e8400-e29b-41d4-a716-446655440000\"");

        let back: Id = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_canonical_form_never_contains_colon() {
        for kind in [
            EntityKind::Assignment,
            EntityKind::User,
            EntityKind::Document,
            EntityKind::Issue,
            EntityKind::Project,
        ] {
            assert!(!Id::new(kind).to_string().contains(':'));
        }
    }

    #[test]
    fn test_assignment_builders() {
        let user = Id::new(EntityKind::User);
        let resource = Id::new(EntityKind::Issue);
        let id = Id::new(EntityKind::Assignment);

        let assignment = Assignment::assignee(user, resource)
            .with_id(id)
            .with_kind(AssignmentKind::Reviewer);

        assert_eq!(assignment.id, id);
        assert_eq!(assignment.kind, AssignmentKind::Reviewer);
        assert_eq!(assignment.user, user);
        assert_eq!(assignment.resource, resource);
    }
}
