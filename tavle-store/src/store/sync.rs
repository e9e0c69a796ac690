//! Load and subscription plumbing.
//!
//! Consistency is reload-driven: change events carry no payload, so the
//! pump answers every one of them with a full refetch of lists and tasks.
//! Lost or coalesced events cost staleness until the next event, never
//! divergence from the backend.

use super::{BoardStore, Shared, StoreEvent};
use crate::backend::{ChangeEvent, Collection};
use crate::error::{Result, StoreError};
use crate::types::{List, Task};
use std::future::Future;
use std::sync::{Arc, Weak};
use tokio::sync::broadcast;
use tokio::time::timeout;
use tracing::{debug, error};

impl Shared {
    /// Apply the configured deadline to one backend call.
    pub(crate) async fn bounded<T>(&self, call: impl Future<Output = Result<T>>) -> Result<T> {
        let deadline = self.config.request_timeout;
        match timeout(deadline, call).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout {
                elapsed_ms: deadline.as_millis() as u64,
            }),
        }
    }

    /// One fetch round trip. Loads are not retried; the next change event
    /// or explicit reload covers a transient failure.
    async fn fetch(&self) -> Result<(Vec<List>, Vec<Task>)> {
        let lists = self.bounded(self.backend.query_lists(&self.board)).await?;
        let tasks = self.bounded(self.backend.query_tasks(&self.board)).await?;
        Ok((lists, tasks))
    }

    /// Fetch all lists and tasks and replace the visible state wholesale.
    /// On failure the previous state is kept and `last_error` is set.
    pub(crate) async fn load(&self) -> Result<()> {
        self.state.write().await.loading = true;
        let fetched = self.fetch().await;

        let mut state = self.state.write().await;
        state.loading = false;
        match fetched {
            Ok((lists, tasks)) => {
                let counts = (lists.len(), tasks.len());
                debug!(
                    "board {} loaded: {} lists, {} tasks",
                    self.board, counts.0, counts.1
                );
                state.lists = lists;
                state.tasks = tasks;
                state.last_error = None;
                drop(state);
                let _ = self.events.send(StoreEvent::Loaded {
                    lists: counts.0,
                    tasks: counts.1,
                });
                Ok(())
            }
            Err(e) => {
                error!("board {} load failed: {}", self.board, e);
                state.last_error = Some(e.to_string());
                drop(state);
                let _ = self.events.send(StoreEvent::LoadFailed {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }
}

impl BoardStore {
    /// Fetch all lists and tasks and replace the visible state wholesale.
    pub async fn load(&self) -> Result<()> {
        self.shared.load().await
    }

    /// Subscribe to the board's change feeds, start the reload pump, and
    /// run the initial load.
    ///
    /// Subscriptions are established before the first fetch so no change
    /// can fall between them. An initial load failure is returned but
    /// leaves the store open: the pump keeps running and the next change
    /// event retries the fetch.
    ///
    /// Calling `open` on an open store tears the previous subscriptions
    /// down and re-subscribes.
    pub async fn open(&self) -> Result<()> {
        self.close();

        let lists_rx = self.shared.backend.subscribe(&self.shared.board, Collection::Lists);
        let tasks_rx = self.shared.backend.subscribe(&self.shared.board, Collection::Tasks);
        let handle = tokio::spawn(pump_loop(
            Arc::downgrade(&self.shared),
            lists_rx,
            tasks_rx,
        ));
        match self.pump.lock() {
            Ok(mut guard) => *guard = Some(handle),
            Err(_) => handle.abort(),
        }

        self.load().await
    }
}

/// Forward change events into reloads until the store goes away or the
/// backend closes its feeds.
///
/// Holds only a weak handle to the store so an open store that gets
/// dropped without `close` still tears down: the next event fails the
/// upgrade and ends the task.
async fn pump_loop(
    shared: Weak<Shared>,
    mut lists_rx: broadcast::Receiver<ChangeEvent>,
    mut tasks_rx: broadcast::Receiver<ChangeEvent>,
) {
    loop {
        let received = tokio::select! {
            event = lists_rx.recv() => event,
            event = tasks_rx.recv() => event,
        };
        match received {
            Ok(event) => {
                debug!(
                    "change event: {} {:?} {}",
                    event.collection,
                    event.kind,
                    event.record_id.as_deref().unwrap_or("?")
                );
            }
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                // fell behind; the reload below resynchronizes regardless
                debug!("change feed lagged by {} events", missed);
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }

        let Some(shared) = shared.upgrade() else {
            break;
        };
        // failures are logged and surfaced on the event feed by load itself
        let _ = shared.load().await;
    }
}
