//! Cache key and pattern construction.
//!
//! Every key is `<Namespace>:<segment>[:<segment>...]`. The leading namespace
//! lets a pattern delete target one logical collection (`Issue:*`) without
//! touching the others. Segments are typed so that no segment can contain the
//! separator, which keeps distinct inputs mapping to distinct keys.

use std::fmt;

use crate::assignment::Id;
use crate::storage::Page;

/// Separator between key segments.
pub const KEY_SEPARATOR: &str = ":";

/// Glob segment matching any suffix.
pub const WILDCARD: &str = "*";

/// The leading discriminator of every cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Assignment,
    Document,
    Issue,
}

impl Namespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Assignment => "Assignment",
            Namespace::Document => "Document",
            Namespace::Issue => "Issue",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The list reads whose results are cached under their own keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListMethod {
    GetByUser,
    GetByResource,
}

impl ListMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListMethod::GetByUser => "GetByUser",
            ListMethod::GetByResource => "GetByResource",
        }
    }
}

impl fmt::Display for ListMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One segment of a cache key after the namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPart {
    /// A typed identifier, rendered in its canonical `<Kind>/<uuid>` form.
    Id(Id),
    /// An integer, rendered in base 10.
    Int(usize),
    /// A list method name.
    Method(ListMethod),
    /// The `*` glob. Only meaningful in patterns.
    Wildcard,
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Id(id) => write!(f, "{}", id),
            KeyPart::Int(n) => write!(f, "{}", n),
            KeyPart::Method(method) => write!(f, "{}", method),
            KeyPart::Wildcard => f.write_str(WILDCARD),
        }
    }
}

/// Joins a namespace and its parts into a key or pattern.
///
/// # Examples
///
/// ```
/// use assigncache_core::cache::{compose, KeyPart, ListMethod, Namespace};
///
/// let pattern = compose(Namespace::Assignment, &[KeyPart::Method(ListMethod::GetByUser), KeyPart::Wildcard]);
/// assert_eq!(pattern, "Assignment:GetByUser:*");
/// ```
pub fn compose(namespace: Namespace, parts: &[KeyPart]) -> String {
    let mut key = namespace.to_string();
    for part in parts {
        key.push_str(KEY_SEPARATOR);
        key.push_str(&part.to_string());
    }
    key
}

/// Returns the cache key for a single assignment.
pub fn assignment_key(id: Id) -> String {
    compose(Namespace::Assignment, &[KeyPart::Id(id)])
}

/// Returns the cache key for one page of a list read.
pub fn assignments_list_key(method: ListMethod, selector: Id, page: Page) -> String {
    compose(
        Namespace::Assignment,
        &[
            KeyPart::Method(method),
            KeyPart::Id(selector),
            KeyPart::Int(page.offset),
            KeyPart::Int(page.limit),
        ],
    )
}

/// Returns the cache key for a page of a user's assignments.
pub fn assignments_by_user_key(user: Id, page: Page) -> String {
    assignments_list_key(ListMethod::GetByUser, user, page)
}

/// Returns the cache key for a page of a resource's assignments.
pub fn assignments_by_resource_key(resource: Id, page: Page) -> String {
    assignments_list_key(ListMethod::GetByResource, resource, page)
}

/// Returns the pattern matching every cached page for one selector.
pub fn assignments_list_pattern(method: ListMethod, selector: Id) -> String {
    compose(
        Namespace::Assignment,
        &[
            KeyPart::Method(method),
            KeyPart::Id(selector),
            KeyPart::Wildcard,
        ],
    )
}

/// Returns the pattern matching every cached page of a user's assignments.
pub fn assignments_by_user_pattern(user: Id) -> String {
    assignments_list_pattern(ListMethod::GetByUser, user)
}

/// Returns the pattern matching every cached page of a resource's assignments.
pub fn assignments_by_resource_pattern(resource: Id) -> String {
    assignments_list_pattern(ListMethod::GetByResource, resource)
}

/// Returns the pattern matching every cached page of a list method, for any selector.
pub fn all_assignments_list_pattern(method: ListMethod) -> String {
    compose(
        Namespace::Assignment,
        &[KeyPart::Method(method), KeyPart::Wildcard],
    )
}

/// Returns the pattern matching every `GetByUser` page.
pub fn all_assignments_by_user_pattern() -> String {
    all_assignments_list_pattern(ListMethod::GetByUser)
}

/// Returns the pattern matching every `GetByResource` page.
pub fn all_assignments_by_resource_pattern() -> String {
    all_assignments_list_pattern(ListMethod::GetByResource)
}

/// Returns the pattern matching every key in a namespace (e.g. `"Issue:*"`).
pub fn namespace_pattern(namespace: Namespace) -> String {
    compose(namespace, &[KeyPart::Wildcard])
}
