//! Cached assignment repository decorator.
//!
//! Wraps an `AssignmentRepository` with read-through caching and
//! write-invalidation.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument::WithSubscriber;
use tracing::{Dispatch, Instrument, Span};

use assigncache_core::assignment::{Assignment, Id};
use assigncache_core::cache::{
    assignment_key, assignments_by_resource_key, assignments_by_user_key, Cache,
};
use assigncache_core::storage::{AssignmentRepository, Page, RepositoryError, Result};

use super::adapter::CacheAdapter;
use super::invalidator::Invalidator;

/// Cached assignment repository decorator.
///
/// - **Reads**: check the cache first; on a miss fetch from the repository,
///   populate the cache, then return. A failed populate is returned as
///   `CacheWrite` instead of the fetched value.
/// - **Writes**: invalidate every affected cache entry first, then persist.
///   A failed invalidation aborts the write before the repository is touched.
///
/// The decorator holds no mutable state, so one instance can be shared
/// across tasks behind an `Arc`.
///
/// # Type Parameters
///
/// * `R` - The underlying repository implementation
/// * `C` - The cache implementation
pub struct CachedAssignmentRepository<R, C>
where
    R: AssignmentRepository,
    C: Cache,
{
    repository: Arc<R>,
    adapter: CacheAdapter<C>,
    invalidator: Invalidator<C>,
    dispatch: Option<Dispatch>,
}

impl<R, C> CachedAssignmentRepository<R, C>
where
    R: AssignmentRepository,
    C: Cache,
{
    /// Creates a new cached assignment repository with default options.
    ///
    /// # Arguments
    ///
    /// * `repository` - The underlying repository to cache
    /// * `cache` - The cache implementation
    pub fn new(repository: Arc<R>, cache: Arc<C>) -> Self {
        let adapter = CacheAdapter::new(cache);
        Self {
            repository,
            invalidator: Invalidator::new(adapter.clone()),
            adapter,
            dispatch: None,
        }
    }

    /// Starts building a cached repository with explicit options.
    pub fn builder(repository: Arc<R>) -> CachedAssignmentRepositoryBuilder<R, C> {
        CachedAssignmentRepositoryBuilder {
            repository,
            client: None,
            tracer: None,
            logger: None,
            cache_timeout: None,
        }
    }

    /// Runs `call` inside a span built by `span`, routed to the configured
    /// dispatcher when there is one.
    async fn traced<T, S, F>(&self, span: S, call: F) -> Result<T>
    where
        S: FnOnce() -> Span + Send,
        F: Future<Output = Result<T>> + Send,
    {
        match &self.dispatch {
            Some(dispatch) => {
                let span = tracing::dispatcher::with_default(dispatch, span);
                call.instrument(span)
                    .with_subscriber(dispatch.clone())
                    .await
            }
            None => call.instrument(span()).await,
        }
    }

    async fn read_through<T, F, Fut>(&self, key: String, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T>> + Send,
    {
        if let Some(value) = self.adapter.get::<T>(&key).await? {
            tracing::trace!(key = %key, "Cache hit");
            return Ok(value);
        }

        tracing::trace!(key = %key, "Cache miss");
        let value = fetch().await?;

        self.adapter.set(&key, &value).await?;
        Ok(value)
    }
}

#[async_trait]
impl<R, C> AssignmentRepository for CachedAssignmentRepository<R, C>
where
    R: AssignmentRepository + 'static,
    C: Cache + 'static,
{
    async fn get(&self, id: Id) -> Result<Assignment> {
        self.traced(
            || tracing::info_span!("assignments.get", assignment_id = %id),
            self.read_through(assignment_key(id), || self.repository.get(id)),
        )
        .await
    }

    async fn get_by_user(&self, user: Id, page: Page) -> Result<Vec<Assignment>> {
        self.traced(
            || {
                tracing::info_span!(
                    "assignments.get_by_user",
                    user = %user,
                    offset = page.offset,
                    limit = page.limit
                )
            },
            self.read_through(assignments_by_user_key(user, page), || {
                self.repository.get_by_user(user, page)
            }),
        )
        .await
    }

    async fn get_by_resource(&self, resource: Id, page: Page) -> Result<Vec<Assignment>> {
        self.traced(
            || {
                tracing::info_span!(
                    "assignments.get_by_resource",
                    resource = %resource,
                    offset = page.offset,
                    limit = page.limit
                )
            },
            self.read_through(assignments_by_resource_key(resource, page), || {
                self.repository.get_by_resource(resource, page)
            }),
        )
        .await
    }

    async fn create(&self, assignment: &Assignment) -> Result<()> {
        self.traced(
            || {
                tracing::info_span!(
                    "assignments.create",
                    assignment_id = %assignment.id,
                    user = %assignment.user,
                    resource = %assignment.resource
                )
            },
            async {
                self.invalidator.invalidate_for_create(assignment).await?;
                self.repository.create(assignment).await?;

                tracing::debug!(
                    assignment_id = %assignment.id,
                    resource = %assignment.resource,
                    "Assignment created"
                );
                Ok(())
            },
        )
        .await
    }

    async fn delete(&self, id: Id) -> Result<()> {
        self.traced(
            || tracing::info_span!("assignments.delete", assignment_id = %id),
            async {
                self.invalidator.invalidate_for_delete(id).await?;
                self.repository.delete(id).await?;

                tracing::debug!(assignment_id = %id, "Assignment deleted");
                Ok(())
            },
        )
        .await
    }
}

/// Options for [`CachedAssignmentRepository`].
///
/// Only the cache client is required. `tracer` and `logger` both accept a
/// `tracing::Dispatch`; spans and events share one dispatcher, so the tracer
/// is used when both are given. Without either, the global default
/// subscriber applies (a no-op unless the application installed one).
pub struct CachedAssignmentRepositoryBuilder<R, C>
where
    R: AssignmentRepository,
    C: Cache,
{
    repository: Arc<R>,
    client: Option<Arc<C>>,
    tracer: Option<Dispatch>,
    logger: Option<Dispatch>,
    cache_timeout: Option<Duration>,
}

impl<R, C> CachedAssignmentRepositoryBuilder<R, C>
where
    R: AssignmentRepository,
    C: Cache,
{
    /// Sets the cache backend. Required.
    pub fn client(mut self, client: Arc<C>) -> Self {
        self.client = Some(client);
        self
    }

    /// Routes spans to `tracer` instead of the global subscriber.
    pub fn tracer(mut self, tracer: impl Into<Dispatch>) -> Self {
        self.tracer = Some(tracer.into());
        self
    }

    /// Routes log events to `logger` instead of the global subscriber.
    pub fn logger(mut self, logger: impl Into<Dispatch>) -> Self {
        self.logger = Some(logger.into());
        self
    }

    /// Bounds every cache call by `timeout`.
    pub fn cache_timeout(mut self, timeout: Duration) -> Self {
        self.cache_timeout = Some(timeout);
        self
    }

    /// Builds the repository.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Configuration` if no client was given or the
    /// cache timeout is zero.
    pub fn build(self) -> Result<CachedAssignmentRepository<R, C>> {
        let client = self.client.ok_or_else(|| {
            RepositoryError::Configuration("cache client is required".to_string())
        })?;

        let mut adapter = CacheAdapter::new(client);
        if let Some(timeout) = self.cache_timeout {
            if timeout.is_zero() {
                return Err(RepositoryError::Configuration(
                    "cache timeout must be greater than zero".to_string(),
                ));
            }
            adapter = adapter.with_timeout(timeout);
        }

        let dispatch = match (self.tracer, self.logger) {
            (Some(tracer), Some(_)) => {
                tracing::dispatcher::with_default(&tracer, || {
                    tracing::debug!("Both tracer and logger set, logger ignored");
                });
                Some(tracer)
            }
            (tracer, logger) => tracer.or(logger),
        };

        Ok(CachedAssignmentRepository {
            repository: self.repository,
            invalidator: Invalidator::new(adapter.clone()),
            adapter,
            dispatch,
        })
    }
}
