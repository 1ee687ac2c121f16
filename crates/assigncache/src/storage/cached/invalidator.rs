//! Invalidation plan for cached assignment data.
//!
//! Assignment reads are cached under the `Assignment` namespace, and
//! document and issue projections cached by sibling services embed assignment
//! data too. Every mutation therefore fans out over both. Steps run in a
//! fixed order (by-resource, by-user, cross-cache) and the first failure
//! aborts the rest.

use assigncache_core::assignment::{Assignment, EntityKind, Id};
use assigncache_core::cache::{
    all_assignments_by_resource_pattern, all_assignments_by_user_pattern, assignment_key,
    assignments_by_resource_pattern, assignments_by_user_pattern, namespace_pattern, Cache,
    Namespace,
};
use assigncache_core::storage::{RepositoryError, Result};

use super::adapter::CacheAdapter;

/// Every namespace whose projections may embed an assignment, in purge order.
const EMBEDDING_NAMESPACES: &[Namespace] = &[Namespace::Document, Namespace::Issue];

const DOCUMENT_NAMESPACES: &[Namespace] = &[Namespace::Document];
const ISSUE_NAMESPACES: &[Namespace] = &[Namespace::Issue];

/// Returns the namespaces whose cached projections embed assignments on a
/// resource of the given kind, or `None` if the kind is not cached anywhere.
pub fn embedding_namespaces(kind: EntityKind) -> Option<&'static [Namespace]> {
    match kind {
        EntityKind::Document => Some(DOCUMENT_NAMESPACES),
        EntityKind::Issue => Some(ISSUE_NAMESPACES),
        _ => None,
    }
}

/// Deletes cache entries made stale by assignment mutations.
pub struct Invalidator<C: Cache> {
    adapter: CacheAdapter<C>,
}

impl<C: Cache> Clone for Invalidator<C> {
    fn clone(&self) -> Self {
        Self {
            adapter: self.adapter.clone(),
        }
    }
}

impl<C: Cache> Invalidator<C> {
    pub fn new(adapter: CacheAdapter<C>) -> Self {
        Self { adapter }
    }

    /// Deletes the cached single-assignment read for `id`.
    pub async fn clear_single(&self, id: Id) -> Result<()> {
        self.adapter.delete(&assignment_key(id)).await
    }

    /// Deletes every cached page of `GetByResource` for one resource.
    pub async fn clear_assignments_by_resource(&self, resource: Id) -> Result<()> {
        self.adapter
            .delete_pattern(&assignments_by_resource_pattern(resource))
            .await
    }

    /// Deletes every cached page of `GetByResource`, for all resources.
    pub async fn clear_all_assignments_by_resource(&self) -> Result<()> {
        self.adapter
            .delete_pattern(&all_assignments_by_resource_pattern())
            .await
    }

    /// Deletes every cached page of `GetByUser` for one user.
    pub async fn clear_assignments_by_user(&self, user: Id) -> Result<()> {
        self.adapter
            .delete_pattern(&assignments_by_user_pattern(user))
            .await
    }

    /// Deletes every cached page of `GetByUser`, for all users.
    pub async fn clear_all_assignments_by_user(&self) -> Result<()> {
        self.adapter
            .delete_pattern(&all_assignments_by_user_pattern())
            .await
    }

    /// Purges sibling namespaces whose projections may embed `assignment`.
    ///
    /// With no assignment every embedding namespace is purged. Otherwise only
    /// the namespace for the resource's kind is; kinds nobody caches fail with
    /// `UnexpectedCachedResource`.
    pub async fn clear_cross_caches(&self, assignment: Option<&Assignment>) -> Result<()> {
        match assignment {
            None => self.purge_namespaces(EMBEDDING_NAMESPACES).await,
            Some(a) => {
                tracing::trace!(assignment_id = %a.id, "Clearing cross caches");
                self.clear_cross_caches_for(a.resource).await
            }
        }
    }

    async fn clear_cross_caches_for(&self, resource: Id) -> Result<()> {
        let namespaces = embedding_namespaces(resource.kind).ok_or_else(|| {
            tracing::warn!(resource = %resource, "No cache namespace embeds this resource kind");
            RepositoryError::UnexpectedCachedResource { resource }
        })?;
        self.purge_namespaces(namespaces).await
    }

    async fn purge_namespaces(&self, namespaces: &[Namespace]) -> Result<()> {
        for namespace in namespaces {
            self.adapter
                .delete_pattern(&namespace_pattern(*namespace))
                .await?;
        }
        Ok(())
    }

    /// Purges everything cached about one resource: its list pages, then the
    /// sibling namespace for its kind.
    pub async fn clear_resource(&self, resource: Id) -> Result<()> {
        self.clear_assignments_by_resource(resource).await?;
        self.clear_cross_caches_for(resource).await
    }

    /// Purges every list page and every embedding namespace.
    pub async fn clear_all(&self) -> Result<()> {
        self.clear_all_assignments_by_resource().await?;
        self.clear_all_assignments_by_user().await?;
        self.clear_cross_caches(None).await
    }

    /// Runs the invalidation that must precede persisting `assignment`.
    pub async fn invalidate_for_create(&self, assignment: &Assignment) -> Result<()> {
        self.clear_assignments_by_resource(assignment.resource).await?;
        self.clear_assignments_by_user(assignment.user).await?;
        self.clear_cross_caches(Some(assignment)).await
    }

    /// Runs the invalidation that must precede deleting assignment `id`.
    ///
    /// The assignment's user and resource are unknown here, so every list
    /// page and every embedding namespace is purged.
    pub async fn invalidate_for_delete(&self, id: Id) -> Result<()> {
        self.clear_single(id).await?;
        self.clear_all().await
    }
}
