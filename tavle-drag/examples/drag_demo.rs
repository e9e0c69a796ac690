//! Scripted drag gesture: press, cross the activation distance, hover the
//! next list over, release, and commit the move through the store.
//!
//! Run with: cargo run --example drag_demo

use std::sync::Arc;

use tavle_drag::{DragController, DropTarget, PointerPosition};
use tavle_store::backend::memory::MemoryBackend;
use tavle_store::types::{BoardId, List};
use tavle_store::{BoardStore, Session};

fn print_board(snapshot: &tavle_store::BoardSnapshot, heading: &str) {
    println!("{heading}");
    for list in &snapshot.lists {
        let titles: Vec<&str> = snapshot
            .tasks_in(&list.id)
            .map(|t| t.title.as_str())
            .collect();
        println!("  {}: {}", list.title, titles.join(", "));
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let backend = Arc::new(MemoryBackend::new());
    let board = BoardId::from("demo-board");
    let todo = List::new(board.clone(), "To Do", 1);
    let doing = List::new(board.clone(), "In Progress", 2);
    let todo_id = todo.id.clone();
    let doing_id = doing.id.clone();
    backend.seed_list(todo).await;
    backend.seed_list(doing).await;

    let store = BoardStore::new(backend, board, Session::authenticated("demo-user"));
    store.open().await?;
    let dragged = store.add_task(&todo_id, Some("Drag me")).await?;
    store.add_task(&todo_id, Some("Stays put")).await?;
    store.load().await?;

    let snapshot = store.snapshot().await;
    print_board(&snapshot, "before:");

    let mut controller = DragController::new();
    controller.pointer_down(&dragged.id, PointerPosition::new(12.0, 40.0));
    // a 3px wiggle is still a click
    controller.pointer_move(PointerPosition::new(14.0, 42.0), &snapshot);
    assert!(!controller.is_dragging());
    // crossing the activation distance starts the drag
    controller.pointer_move(PointerPosition::new(12.0, 52.0), &snapshot);
    assert!(controller.is_dragging());

    controller.hover(DropTarget::List(doing_id), &snapshot);
    if let Some(preview) = controller.preview(&snapshot) {
        let moved = preview.iter().find(|t| t.id == dragged.id);
        if let Some(moved) = moved {
            println!("preview: '{}' now shows under list {}", moved.title, moved.list_id);
        }
    }

    if let Some(request) = controller.release(&snapshot) {
        println!(
            "drop: task {} -> list {} at index {}",
            request.task, request.list, request.index
        );
        store
            .move_task(&request.task, &request.list, request.index)
            .await?;
    }

    store.load().await?;
    print_board(&store.snapshot().await, "after:");

    store.close();
    Ok(())
}
