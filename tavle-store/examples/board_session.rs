//! Walk a board session end to end against the in-memory backend.
//!
//! Run with: cargo run --example board_session

use std::sync::Arc;

use tavle_store::backend::memory::MemoryBackend;
use tavle_store::types::{BoardId, List};
use tavle_store::{BoardStore, Priority, Session, TaskPatch};

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
    let (todo_id, doing_id) = (todo.id.clone(), doing.id.clone());
    backend.seed_list(todo).await;
    backend.seed_list(doing).await;

    let store = BoardStore::new(backend.clone(), board, Session::authenticated("demo-user"));
    let mut events = store.events();
    store.open().await?;

    let report = store.add_task(&todo_id, Some("Write the report")).await?;
    let review = store.add_task(&todo_id, Some("Review the roadmap")).await?;
    store
        .update_task(
            &report.id,
            TaskPatch::new()
                .with_priority(Priority::High)
                .with_description(Some("Quarterly numbers, due Friday".into())),
        )
        .await?;
    store.move_task(&review.id, &doing_id, 0).await?;

    store.load().await?;
    let snapshot = store.snapshot().await;
    for list in &snapshot.lists {
        println!("{}", list.title);
        for task in snapshot.tasks_in(&list.id) {
            println!(
                "  [{}] {} ({})",
                task.position,
                task.title,
                task.priority.as_str()
            );
        }
    }

    while let Ok(event) = events.try_recv() {
        println!("event: {event:?}");
    }

    println!("journal:");
    for entry in backend.activity_snapshot().await {
        println!("  {} by {:?}", entry.action, entry.user_id);
    }

    store.close();
    Ok(())
}
