//! In-memory reference backend.
//!
//! Serves a single board out of process memory while honoring the full
//! backend contract: ordered queries, a change event per mutation, and the
//! not-found passthrough. Failure and latency injection hooks make the
//! retry and deadline paths testable without a real network.

use crate::backend::{Backend, ChangeEvent, ChangeKind, Collection};
use crate::error::{Result, StoreError};
use crate::types::{ActivityEntry, BoardId, List, NewTask, Task, TaskId, TaskPatch};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tokio::time::sleep;

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Default)]
struct Inner {
    lists: Vec<List>,
    tasks: Vec<Task>,
    activity: Vec<ActivityEntry>,
}

/// In-memory [`Backend`] for tests, examples, and offline development.
///
/// One instance holds one board; the `board` argument of queries and
/// subscriptions scopes nothing here beyond matching the trait shape.
pub struct MemoryBackend {
    inner: Mutex<Inner>,
    lists_tx: broadcast::Sender<ChangeEvent>,
    tasks_tx: broadcast::Sender<ChangeEvent>,
    activity_tx: broadcast::Sender<ChangeEvent>,
    latency_ms: AtomicU64,
    fail_queries: AtomicU32,
    fail_inserts: AtomicU32,
    fail_updates: AtomicU32,
    fail_deletes: AtomicU32,
    fail_activity: AtomicU32,
}

impl MemoryBackend {
    pub fn new() -> Self {
        let (lists_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (tasks_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (activity_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Mutex::new(Inner::default()),
            lists_tx,
            tasks_tx,
            activity_tx,
            latency_ms: AtomicU64::new(0),
            fail_queries: AtomicU32::new(0),
            fail_inserts: AtomicU32::new(0),
            fail_updates: AtomicU32::new(0),
            fail_deletes: AtomicU32::new(0),
            fail_activity: AtomicU32::new(0),
        }
    }

    /// Seed a list without publishing a change event.
    pub async fn seed_list(&self, list: List) {
        self.inner.lock().await.lists.push(list);
    }

    /// Seed a task without publishing a change event.
    pub async fn seed_task(&self, task: Task) {
        self.inner.lock().await.tasks.push(task);
    }

    /// Insert a list as another client would, publishing a change event.
    pub async fn insert_list(&self, list: List) {
        let id = list.id.to_string();
        self.inner.lock().await.lists.push(list);
        self.publish(&self.lists_tx, Collection::Lists, ChangeKind::Insert, Some(id));
    }

    /// Snapshot of the stored tasks, unordered.
    pub async fn tasks_snapshot(&self) -> Vec<Task> {
        self.inner.lock().await.tasks.clone()
    }

    /// Snapshot of the stored lists, unordered.
    pub async fn lists_snapshot(&self) -> Vec<List> {
        self.inner.lock().await.lists.clone()
    }

    /// Snapshot of the activity journal, in append order.
    pub async fn activity_snapshot(&self) -> Vec<ActivityEntry> {
        self.inner.lock().await.activity.clone()
    }

    /// Number of live subscriptions to a collection.
    pub fn subscriber_count(&self, collection: Collection) -> usize {
        self.sender(collection).receiver_count()
    }

    /// Delay applied before every backend call. Zero disables.
    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms
            .store(latency.as_millis() as u64, Ordering::Relaxed);
    }

    /// Fail the next `n` queries with a transport error.
    pub fn fail_next_queries(&self, n: u32) {
        self.fail_queries.store(n, Ordering::SeqCst);
    }

    /// Fail the next `n` task inserts with a transport error.
    pub fn fail_next_inserts(&self, n: u32) {
        self.fail_inserts.store(n, Ordering::SeqCst);
    }

    /// Fail the next `n` task updates with a transport error.
    pub fn fail_next_updates(&self, n: u32) {
        self.fail_updates.store(n, Ordering::SeqCst);
    }

    /// Fail the next `n` task deletes with a transport error.
    pub fn fail_next_deletes(&self, n: u32) {
        self.fail_deletes.store(n, Ordering::SeqCst);
    }

    /// Fail the next `n` activity appends with a transport error.
    pub fn fail_next_activity(&self, n: u32) {
        self.fail_activity.store(n, Ordering::SeqCst);
    }

    fn sender(&self, collection: Collection) -> &broadcast::Sender<ChangeEvent> {
        match collection {
            Collection::Lists => &self.lists_tx,
            Collection::Tasks => &self.tasks_tx,
            Collection::Activity => &self.activity_tx,
        }
    }

    fn publish(
        &self,
        tx: &broadcast::Sender<ChangeEvent>,
        collection: Collection,
        kind: ChangeKind,
        record_id: Option<String>,
    ) {
        // send fails only when nobody is subscribed
        let _ = tx.send(ChangeEvent {
            collection,
            kind,
            record_id,
        });
    }

    /// Apply injected latency, then consume one failure from `gate` if any
    /// are armed.
    async fn simulate(&self, gate: &AtomicU32) -> Result<()> {
        let latency = self.latency_ms.load(Ordering::Relaxed);
        if latency > 0 {
            sleep(Duration::from_millis(latency)).await;
        }
        let armed = gate
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if armed {
            return Err(StoreError::transport("injected backend failure"));
        }
        Ok(())
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn query_lists(&self, _board: &BoardId) -> Result<Vec<List>> {
        self.simulate(&self.fail_queries).await?;
        let inner = self.inner.lock().await;
        let mut lists = inner.lists.clone();
        lists.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(lists)
    }

    async fn query_tasks(&self, _board: &BoardId) -> Result<Vec<Task>> {
        self.simulate(&self.fail_queries).await?;
        let inner = self.inner.lock().await;
        let mut tasks = inner.tasks.clone();
        tasks.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(tasks)
    }

    async fn insert_task(&self, task: NewTask) -> Result<Task> {
        self.simulate(&self.fail_inserts).await?;
        let now = Utc::now();
        let record = Task {
            id: TaskId::new(),
            list_id: task.list_id,
            title: task.title,
            description: None,
            position: task.position,
            start_date: None,
            end_date: None,
            assignee_id: task.assignee_id,
            priority: task.priority,
            status: task.status,
            created_at: now,
            updated_at: now,
        };
        self.inner.lock().await.tasks.push(record.clone());
        self.publish(
            &self.tasks_tx,
            Collection::Tasks,
            ChangeKind::Insert,
            Some(record.id.to_string()),
        );
        Ok(record)
    }

    async fn update_task(&self, id: &TaskId, patch: TaskPatch) -> Result<()> {
        self.simulate(&self.fail_updates).await?;
        {
            let mut inner = self.inner.lock().await;
            let task = inner
                .tasks
                .iter_mut()
                .find(|t| &t.id == id)
                .ok_or_else(|| StoreError::task_not_found(id.as_str()))?;
            let bump = patch.updated_at.is_none();
            patch.apply(task);
            if bump {
                task.updated_at = Utc::now();
            }
        }
        self.publish(
            &self.tasks_tx,
            Collection::Tasks,
            ChangeKind::Update,
            Some(id.to_string()),
        );
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> Result<()> {
        self.simulate(&self.fail_deletes).await?;
        {
            let mut inner = self.inner.lock().await;
            let index = inner
                .tasks
                .iter()
                .position(|t| &t.id == id)
                .ok_or_else(|| StoreError::task_not_found(id.as_str()))?;
            inner.tasks.remove(index);
        }
        self.publish(
            &self.tasks_tx,
            Collection::Tasks,
            ChangeKind::Delete,
            Some(id.to_string()),
        );
        Ok(())
    }

    async fn insert_activity(&self, entry: ActivityEntry) -> Result<()> {
        self.simulate(&self.fail_activity).await?;
        let id = entry.id.to_string();
        self.inner.lock().await.activity.push(entry);
        self.publish(
            &self.activity_tx,
            Collection::Activity,
            ChangeKind::Insert,
            Some(id),
        );
        Ok(())
    }

    fn subscribe(
        &self,
        _board: &BoardId,
        collection: Collection,
    ) -> broadcast::Receiver<ChangeEvent> {
        self.sender(collection).subscribe()
    }
}
