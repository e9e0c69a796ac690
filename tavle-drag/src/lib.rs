//! Drag-reorder controller for board views.
//!
//! Sits between input events and a [`tavle_store::BoardStore`]: presses,
//! pointer movement, and hovers reshape a transient preview layer, and a
//! release with a live drop target yields at most one [`MoveRequest`] for
//! the application to submit. The committed state stays in the store; the
//! preview is a pure projection over its snapshots, so reverting a gesture
//! is nothing more than dropping it.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use tavle_drag::{DragController, DropTarget, PointerPosition};
//! use tavle_store::backend::memory::MemoryBackend;
//! use tavle_store::types::{BoardId, List};
//! use tavle_store::{BoardStore, Session};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = Arc::new(MemoryBackend::new());
//! let board = BoardId::from("board-1");
//! let todo = List::new(board.clone(), "To Do", 1);
//! let doing = List::new(board.clone(), "In Progress", 2);
//! let doing_id = doing.id.clone();
//! let todo_id = todo.id.clone();
//! backend.seed_list(todo).await;
//! backend.seed_list(doing).await;
//!
//! let store = BoardStore::new(backend, board, Session::authenticated("user-1"));
//! store.open().await?;
//! let task = store.add_task(&todo_id, Some("Drag me")).await?;
//! store.load().await?;
//!
//! let mut controller = DragController::new();
//! let snapshot = store.snapshot().await;
//! controller.pointer_down(&task.id, PointerPosition::new(0.0, 0.0));
//! controller.pointer_move(PointerPosition::new(8.0, 0.0), &snapshot);
//! controller.hover(DropTarget::List(doing_id), &snapshot);
//!
//! if let Some(request) = controller.release(&snapshot) {
//!     store.move_task(&request.task, &request.list, request.index).await?;
//! }
//! # Ok(())
//! # }
//! ```

mod controller;
mod preview;

pub use controller::{
    DragController, DropTarget, MoveRequest, PointerPosition, DRAG_ACTIVATION_DISTANCE,
};
pub use preview::{array_move, WorkingOrder};
