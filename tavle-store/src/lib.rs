//! Board state store for kanban-style project boards.
//!
//! This crate is the client-side source of truth for one board: it mediates
//! every read and write against a persistence and realtime service (the
//! [`Backend`](backend::Backend) trait), keeps the visible state consistent,
//! and owns the reconciliation rules that make drag-and-drop feel right.
//!
//! ## Design
//!
//! - **One store, one board.** A [`BoardStore`] is constructed for a board
//!   and a [`Session`] and holds lists and tasks for that board only.
//! - **Reload-driven consistency.** Change events carry no payload; any
//!   event for the board's lists or tasks triggers a full refetch. Lost
//!   events cost staleness until the next one, never divergence.
//! - **Write-through mutations.** `add`, `update`, `delete` and `move`
//!   write to the backend and let the reload echo the result back; local
//!   state is never patched in place.
//! - **Two move semantics.** Minimal single-task position writes (the
//!   default) or contiguous renumbering of the affected lists, selected by
//!   [`MoveSemantics`].
//! - **Explicit lifecycle.** [`BoardStore::open`] subscribes and starts the
//!   reload pump; [`BoardStore::close`] or dropping the store tears it
//!   down exactly once.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use tavle_store::backend::memory::MemoryBackend;
//! use tavle_store::types::{BoardId, List};
//! use tavle_store::{BoardStore, Session, TaskPatch};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = Arc::new(MemoryBackend::new());
//! let board = BoardId::from("board-1");
//! let todo = List::new(board.clone(), "To Do", 1);
//! let todo_id = todo.id.clone();
//! backend.seed_list(todo).await;
//!
//! let store = BoardStore::new(backend.clone(), board, Session::authenticated("user-1"));
//! store.open().await?;
//!
//! let task = store.add_task(&todo_id, Some("Write the report")).await?;
//! store
//!     .update_task(
//!         &task.id,
//!         TaskPatch::new().with_description(Some("due Friday".into())),
//!     )
//!     .await?;
//!
//! store.load().await?;
//! let snapshot = store.snapshot().await;
//! assert_eq!(snapshot.tasks_in(&todo_id).count(), 1);
//! store.close();
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod defaults;
mod error;
pub mod retry;
mod session;
mod store;
pub mod types;

pub use config::{MoveSemantics, StoreConfig};
pub use error::{Result, StoreError};
pub use retry::RetryConfig;
pub use session::Session;
pub use store::{BoardSnapshot, BoardStore, StoreEvent};

// Re-export the types most callers touch
pub use types::{
    ActivityEntry, BoardId, List, ListId, NewTask, Priority, Task, TaskId, TaskPatch, UserId,
};
