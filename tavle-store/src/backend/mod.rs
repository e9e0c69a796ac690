//! Backend abstraction: the persistence and realtime service behind a board.

pub mod memory;

use crate::error::Result;
use crate::types::{ActivityEntry, BoardId, List, NewTask, Task, TaskId, TaskPatch};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

/// Record collections a backend serves for a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Lists,
    Tasks,
    Activity,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Lists => "lists",
            Collection::Tasks => "tasks",
            Collection::Activity => "activity",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// Change notification for one collection of one board.
///
/// Events carry no record payload. Subscribers treat every event as an
/// invalidation signal and refetch; `record_id` exists for logging only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub collection: Collection,
    pub kind: ChangeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
}

/// The persistence and realtime service behind a board.
///
/// Query results come back ordered by `position`, with a stable tie-break
/// on creation time and then id, so reloads stay deterministic when
/// positions collide. Dropping the receiver returned by [`subscribe`] is
/// the unsubscribe.
///
/// [`subscribe`]: Backend::subscribe
#[async_trait]
pub trait Backend: Send + Sync {
    /// All lists of the board, ordered by position.
    async fn query_lists(&self, board: &BoardId) -> Result<Vec<List>>;

    /// All tasks of the board, ordered by position.
    async fn query_tasks(&self, board: &BoardId) -> Result<Vec<Task>>;

    /// Insert a task. The backend assigns id and timestamps and returns the
    /// created record.
    async fn insert_task(&self, task: NewTask) -> Result<Task>;

    /// Partially update a task. A missing target surfaces
    /// [`StoreError::TaskNotFound`](crate::StoreError::TaskNotFound).
    async fn update_task(&self, id: &TaskId, patch: TaskPatch) -> Result<()>;

    /// Delete a task. A missing target surfaces
    /// [`StoreError::TaskNotFound`](crate::StoreError::TaskNotFound).
    async fn delete_task(&self, id: &TaskId) -> Result<()>;

    /// Append an activity journal entry.
    async fn insert_activity(&self, entry: ActivityEntry) -> Result<()>;

    /// Subscribe to change events for one collection of the board.
    fn subscribe(&self, board: &BoardId, collection: Collection)
        -> broadcast::Receiver<ChangeEvent>;
}
