//! Board state store: the single source of truth for one board's view.

mod mutate;
mod sync;

use crate::backend::Backend;
use crate::config::StoreConfig;
use crate::session::Session;
use crate::types::{BoardId, List, ListId, Task, TaskId};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;

/// The visible state of one board.
///
/// Snapshots are cheap value copies of the committed state; they never
/// reflect an in-flight drag preview.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Lists in position order.
    pub lists: Vec<List>,
    /// Tasks in board-wide position order.
    pub tasks: Vec<Task>,
    /// True while a load is in flight.
    pub loading: bool,
    /// Message of the most recent failure, cleared by the next successful
    /// load.
    pub last_error: Option<String>,
}

impl BoardSnapshot {
    /// Find a task by id.
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Find a list by id.
    pub fn list(&self, id: &ListId) -> Option<&List> {
        self.lists.iter().find(|l| &l.id == id)
    }

    /// Tasks of one list, preserving the board-wide order.
    pub fn tasks_in<'a>(&'a self, list: &'a ListId) -> impl Iterator<Item = &'a Task> {
        self.tasks.iter().filter(move |t| &t.list_id == list)
    }
}

/// Feedback events published on the store's event feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// A load completed and replaced the visible state wholesale.
    Loaded { lists: usize, tasks: usize },
    /// A load failed; the previous state (stale or empty) is kept.
    LoadFailed { message: String },
    /// A mutation failed after exhausting its retry budget.
    MutationFailed { op: String, message: String },
}

/// State and collaborators shared between the store facade and its
/// subscription pump.
pub(crate) struct Shared {
    pub(crate) board: BoardId,
    pub(crate) backend: Arc<dyn Backend>,
    pub(crate) session: Session,
    pub(crate) config: StoreConfig,
    pub(crate) state: RwLock<BoardSnapshot>,
    pub(crate) events: broadcast::Sender<StoreEvent>,
}

/// Client-side source of truth for one board.
///
/// The store owns the committed state, mediates every read and write
/// against the backend, and keeps itself consistent through coarse
/// invalidate-and-reload: any change event for the board's lists or tasks
/// triggers a full refetch. Mutations write remotely and let the reload
/// echo them back; the one observable consequence is a short window where
/// the local copy is stale.
///
/// `open` subscribes and starts the reload pump; `close` (or dropping the
/// store) tears the subscriptions down exactly once.
pub struct BoardStore {
    pub(crate) shared: Arc<Shared>,
    pub(crate) pump: Mutex<Option<JoinHandle<()>>>,
}

impl BoardStore {
    /// Create a store for `board` with default configuration.
    pub fn new(backend: Arc<dyn Backend>, board: BoardId, session: Session) -> Self {
        Self::with_config(backend, board, session, StoreConfig::default())
    }

    /// Create a store with explicit configuration.
    pub fn with_config(
        backend: Arc<dyn Backend>,
        board: BoardId,
        session: Session,
        config: StoreConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(config.event_buffer);
        Self {
            shared: Arc::new(Shared {
                board,
                backend,
                session,
                config,
                state: RwLock::new(BoardSnapshot::default()),
                events,
            }),
            pump: Mutex::new(None),
        }
    }

    /// A value copy of the current visible state.
    pub async fn snapshot(&self) -> BoardSnapshot {
        self.shared.state.read().await.clone()
    }

    /// Subscribe to the store's feedback events.
    pub fn events(&self) -> broadcast::Receiver<StoreEvent> {
        self.shared.events.subscribe()
    }

    pub fn board_id(&self) -> &BoardId {
        &self.shared.board
    }

    pub fn session(&self) -> &Session {
        &self.shared.session
    }

    pub fn config(&self) -> &StoreConfig {
        &self.shared.config
    }

    /// Stop watching for backend changes. Idempotent; dropping the store
    /// calls this too. The committed state stays readable afterwards.
    pub fn close(&self) {
        let handle = match self.pump.lock() {
            Ok(mut guard) => guard.take(),
            Err(_) => None,
        };
        if let Some(handle) = handle {
            handle.abort();
            tracing::debug!("board {} subscriptions closed", self.shared.board);
        }
    }
}

impl Drop for BoardStore {
    fn drop(&mut self) {
        self.close();
    }
}
