//! Test doubles shared by the cached repository tests.
//!
//! Both doubles append to one journal so tests can assert the exact order of
//! cache and store calls across components. Journal entries look like
//! `get:<key>`, `set:<key>`, `delete:<key>`, `keys:<pattern>` for the cache
//! and `store:<method>` for the repository.
//!
//! `TraceRecorder` is a `tracing` layer that keeps span names and event
//! messages, for asserting what reaches a configured dispatcher.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::field::{Field, Visit};
use tracing::{span, Dispatch, Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use assigncache_core::assignment::{Assignment, Id};
use assigncache_core::cache::{pattern_matches, Cache, CacheError, Result as CacheResult};
use assigncache_core::storage::{AssignmentRepository, Page, Result};

use crate::storage::inmemory::InMemoryAssignmentRepository;

#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub async fn push(&self, entry: impl Into<String>) {
        self.0.lock().await.push(entry.into());
    }

    pub async fn entries(&self) -> Vec<String> {
        self.0.lock().await.clone()
    }

    /// Entries excluding the per-key deletes issued inside pattern deletes,
    /// which depend on what happened to be cached. Single-assignment deletes
    /// (`delete:Assignment:Assignment/...`) are kept.
    pub async fn plan(&self) -> Vec<String> {
        self.entries()
            .await
            .into_iter()
            .filter(|e| {
                e.starts_with("keys:")
                    || e.starts_with("store:")
                    || e.starts_with("delete:Assignment:Assignment/")
            })
            .collect()
    }

    pub async fn clear(&self) {
        self.0.lock().await.clear();
    }
}

/// Cache double backed by a `HashMap` with injectable failures.
pub struct RecordingCache {
    pub store: RwLock<HashMap<String, Vec<u8>>>,
    journal: Journal,
    failing: RwLock<HashSet<String>>,
    delay: Option<Duration>,
}

impl RecordingCache {
    pub fn new(journal: Journal) -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            journal,
            failing: RwLock::new(HashSet::new()),
            delay: None,
        }
    }

    /// Makes every call slower than the given duration.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fails calls whose journal entry equals `op`, or every call of that
    /// kind when `op` is a bare operation name (`"get"`, `"set"`, ...).
    pub async fn fail_on(&self, op: &str) {
        self.failing.write().await.insert(op.to_string());
    }

    pub async fn insert(&self, key: &str, value: &[u8]) {
        self.store
            .write()
            .await
            .insert(key.to_string(), value.to_vec());
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.store.read().await.contains_key(key)
    }

    pub async fn keys_matching(&self, pattern: &str) -> Vec<String> {
        self.store
            .read()
            .await
            .keys()
            .filter(|k| pattern_matches(pattern, k))
            .cloned()
            .collect()
    }

    async fn record(&self, op: &str, target: &str) -> CacheResult<()> {
        let entry = format!("{}:{}", op, target);
        self.journal.push(entry.clone()).await;
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let failing = self.failing.read().await;
        if failing.contains(op) || failing.contains(&entry) {
            return Err(CacheError::ConnectionFailed(format!("injected failure on {}", entry)));
        }
        Ok(())
    }
}

#[async_trait]
impl Cache for RecordingCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        self.record("get", key).await?;
        Ok(self.store.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> CacheResult<()> {
        self.record("set", key).await?;
        self.insert(key, value).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.record("delete", key).await?;
        self.store.write().await.remove(key);
        Ok(())
    }

    async fn keys(&self, pattern: &str) -> CacheResult<Vec<String>> {
        self.record("keys", pattern).await?;
        let mut keys = self.keys_matching(pattern).await;
        keys.sort();
        Ok(keys)
    }
}

/// Store double that counts calls and journals them.
pub struct RecordingRepository {
    inner: InMemoryAssignmentRepository,
    journal: Journal,
    pub get_calls: AtomicUsize,
    pub get_by_user_calls: AtomicUsize,
    pub get_by_resource_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

impl RecordingRepository {
    pub fn new(journal: Journal) -> Self {
        Self {
            inner: InMemoryAssignmentRepository::new(),
            journal,
            get_calls: AtomicUsize::new(0),
            get_by_user_calls: AtomicUsize::new(0),
            get_by_resource_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        }
    }

    /// Seeds the store without journaling.
    pub async fn insert(&self, assignment: &Assignment) {
        self.inner
            .create(assignment)
            .await
            .expect("seed assignment should be valid");
    }
}

#[async_trait]
impl AssignmentRepository for RecordingRepository {
    async fn get(&self, id: Id) -> Result<Assignment> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.journal.push("store:get").await;
        self.inner.get(id).await
    }

    async fn get_by_user(&self, user: Id, page: Page) -> Result<Vec<Assignment>> {
        self.get_by_user_calls.fetch_add(1, Ordering::SeqCst);
        self.journal.push("store:get_by_user").await;
        self.inner.get_by_user(user, page).await
    }

    async fn get_by_resource(&self, resource: Id, page: Page) -> Result<Vec<Assignment>> {
        self.get_by_resource_calls.fetch_add(1, Ordering::SeqCst);
        self.journal.push("store:get_by_resource").await;
        self.inner.get_by_resource(resource, page).await
    }

    async fn create(&self, assignment: &Assignment) -> Result<()> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.journal.push("store:create").await;
        self.inner.create(assignment).await
    }

    async fn delete(&self, id: Id) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.journal.push("store:delete").await;
        self.inner.delete(id).await
    }
}

/// Records span names and event messages seen by one dispatcher.
#[derive(Clone, Default)]
pub struct TraceRecorder {
    spans: Arc<std::sync::Mutex<Vec<String>>>,
    events: Arc<std::sync::Mutex<Vec<String>>>,
}

impl TraceRecorder {
    pub fn dispatch(&self) -> Dispatch {
        Dispatch::new(tracing_subscriber::registry().with(self.clone()))
    }

    pub fn spans(&self) -> Vec<String> {
        self.spans.lock().unwrap().clone()
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for TraceRecorder {
    fn on_new_span(&self, attrs: &span::Attributes<'_>, _id: &span::Id, _ctx: Context<'_, S>) {
        self.spans
            .lock()
            .unwrap()
            .push(attrs.metadata().name().to_string());
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(visitor.0);
    }
}
