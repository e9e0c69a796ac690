//! Integration tests for the full gesture: press, drag, hover, release,
//! commit through the store, reload.

use std::sync::Arc;

use tavle_drag::{DragController, DropTarget, PointerPosition};
use tavle_store::backend::memory::MemoryBackend;
use tavle_store::backend::Backend;
use tavle_store::types::{BoardId, List, ListId, Task, TaskId};
use tavle_store::{
    BoardSnapshot, BoardStore, MoveSemantics, Session, StoreConfig, StoreError, StoreEvent,
};

struct Fixture {
    backend: Arc<MemoryBackend>,
    board: BoardId,
    todo: ListId,
    doing: ListId,
}

async fn fixture() -> Fixture {
    let backend = Arc::new(MemoryBackend::new());
    let board = BoardId::from("board-1");
    let todo = List::new(board.clone(), "To Do", 1);
    let doing = List::new(board.clone(), "In Progress", 2);
    let fixture = Fixture {
        backend: backend.clone(),
        board,
        todo: todo.id.clone(),
        doing: doing.id.clone(),
    };
    backend.seed_list(todo).await;
    backend.seed_list(doing).await;
    fixture
}

impl Fixture {
    fn store(&self) -> BoardStore {
        BoardStore::new(
            self.backend.clone(),
            self.board.clone(),
            Session::authenticated("user-1"),
        )
    }

    fn store_with(&self, config: StoreConfig) -> BoardStore {
        BoardStore::with_config(
            self.backend.clone(),
            self.board.clone(),
            Session::authenticated("user-1"),
            config,
        )
    }

    async fn seed_task(&self, list: &ListId, title: &str, position: i64) -> TaskId {
        let task = Task::new(list.clone(), title, position);
        let id = task.id.clone();
        self.backend.seed_task(task).await;
        id
    }
}

fn activate(controller: &mut DragController, task: &TaskId, snapshot: &BoardSnapshot) {
    controller.pointer_down(task, PointerPosition::new(0.0, 0.0));
    assert!(controller.pointer_move(PointerPosition::new(10.0, 0.0), snapshot));
}

#[tokio::test]
async fn test_full_drag_commits_exactly_one_move() {
    let f = fixture().await;
    let t1 = f.seed_task(&f.todo, "t1", 1).await;
    let t2 = f.seed_task(&f.todo, "t2", 2).await;
    let t3 = f.seed_task(&f.doing, "t3", 1).await;
    let store = f.store();
    store.load().await.unwrap();
    let snapshot = store.snapshot().await;

    let mut controller = DragController::new();
    activate(&mut controller, &t1, &snapshot);
    controller.hover(DropTarget::Task(t3.clone()), &snapshot);

    // the preview carries the move before anything is committed
    let preview = controller.preview(&snapshot).unwrap();
    assert_eq!(preview.iter().find(|t| t.id == t1).unwrap().list_id, f.doing);

    let request = controller.release(&snapshot).unwrap();
    assert_eq!(request.task, t1);
    assert_eq!(request.list, f.doing);
    assert_eq!(request.index, 1);

    store
        .move_task(&request.task, &request.list, request.index)
        .await
        .unwrap();
    store.load().await.unwrap();

    let after = store.snapshot().await;
    assert_eq!(after.task(&t1).unwrap().list_id, f.doing);
    // minimal write: the requested index lands verbatim as the position
    assert_eq!(after.task(&t1).unwrap().position, 1);
    // and nothing else was written
    assert_eq!(after.task(&t2).unwrap().position, 2);
    assert_eq!(after.task(&t3).unwrap().position, 1);
}

#[tokio::test]
async fn test_preview_never_touches_committed_state() {
    let f = fixture().await;
    let t1 = f.seed_task(&f.todo, "t1", 1).await;
    f.seed_task(&f.doing, "t2", 2).await;
    let store = f.store();
    store.load().await.unwrap();
    let before = store.snapshot().await;
    let stored_before = f.backend.tasks_snapshot().await;

    let mut controller = DragController::new();
    activate(&mut controller, &t1, &before);
    controller.hover(DropTarget::List(f.doing.clone()), &before);
    let preview = controller.preview(&before).unwrap();
    assert_eq!(preview.iter().find(|t| t.id == t1).unwrap().list_id, f.doing);

    // mid-gesture, both layers of truth are exactly as they were
    assert_eq!(store.snapshot().await, before);
    assert_eq!(f.backend.tasks_snapshot().await, stored_before);
}

#[tokio::test]
async fn test_release_off_target_reverts_cleanly() {
    let f = fixture().await;
    let t1 = f.seed_task(&f.todo, "t1", 1).await;
    f.seed_task(&f.todo, "t2", 2).await;
    let store = f.store();
    store.load().await.unwrap();
    let before = store.snapshot().await;

    let mut controller = DragController::new();
    activate(&mut controller, &t1, &before);
    controller.hover(DropTarget::List(f.doing.clone()), &before);
    controller.clear_hover();

    assert!(controller.release(&before).is_none());
    assert_eq!(store.snapshot().await, before);
    assert_eq!(
        f.backend.tasks_snapshot().await.len(),
        before.tasks.len()
    );
}

#[tokio::test]
async fn test_drop_into_empty_list() {
    let f = fixture().await;
    let t1 = f.seed_task(&f.todo, "t1", 1).await;
    let store = f.store();
    store.load().await.unwrap();
    let snapshot = store.snapshot().await;

    let mut controller = DragController::new();
    activate(&mut controller, &t1, &snapshot);
    controller.hover(DropTarget::List(f.doing.clone()), &snapshot);

    let request = controller.release(&snapshot).unwrap();
    assert_eq!(request.list, f.doing);
    assert_eq!(request.index, 0);

    store
        .move_task(&request.task, &request.list, request.index)
        .await
        .unwrap();
    store.load().await.unwrap();

    let after = store.snapshot().await;
    assert_eq!(after.tasks_in(&f.doing).count(), 1);
    assert_eq!(after.tasks_in(&f.todo).count(), 0);
}

#[tokio::test]
async fn test_cancel_commits_nothing() {
    let f = fixture().await;
    let t1 = f.seed_task(&f.todo, "t1", 1).await;
    let store = f.store();
    store.load().await.unwrap();
    let before = store.snapshot().await;

    let mut controller = DragController::new();
    activate(&mut controller, &t1, &before);
    controller.hover(DropTarget::List(f.doing.clone()), &before);
    controller.cancel();

    assert!(controller.release(&before).is_none());
    assert_eq!(store.snapshot().await, before);

    // the controller is immediately reusable
    activate(&mut controller, &t1, &before);
    assert!(controller.is_dragging());
}

#[tokio::test]
async fn test_task_deleted_mid_drag_reverts() {
    let f = fixture().await;
    let t1 = f.seed_task(&f.todo, "t1", 1).await;
    f.seed_task(&f.todo, "t2", 2).await;
    let store = f.store();
    store.load().await.unwrap();
    let snapshot = store.snapshot().await;

    let mut controller = DragController::new();
    activate(&mut controller, &t1, &snapshot);
    controller.hover(DropTarget::List(f.doing.clone()), &snapshot);

    // another client deletes the dragged task and the reload lands
    f.backend.delete_task(&t1).await.unwrap();
    store.load().await.unwrap();
    let fresh = store.snapshot().await;

    assert!(controller.release(&fresh).is_none());
    assert!(fresh.task(&t1).is_none());
    assert_eq!(fresh.tasks.len(), 1);
}

#[tokio::test]
async fn test_renumber_drag_end_to_end() {
    let f = fixture().await;
    let t1 = f.seed_task(&f.todo, "t1", 1).await;
    let t2 = f.seed_task(&f.todo, "t2", 2).await;
    let t3 = f.seed_task(&f.doing, "t3", 1).await;
    let store = f.store_with(StoreConfig::new().with_move_semantics(MoveSemantics::Renumber));
    store.load().await.unwrap();
    let snapshot = store.snapshot().await;

    let mut controller = DragController::new();
    activate(&mut controller, &t1, &snapshot);
    controller.hover(DropTarget::Task(t3.clone()), &snapshot);
    let request = controller.release(&snapshot).unwrap();

    store
        .move_task(&request.task, &request.list, request.index)
        .await
        .unwrap();
    store.load().await.unwrap();

    let after = store.snapshot().await;
    let doing: Vec<(TaskId, i64)> = after
        .tasks_in(&f.doing)
        .map(|t| (t.id.clone(), t.position))
        .collect();
    assert_eq!(doing, vec![(t3, 1), (t1, 2)]);
    let todo: Vec<(TaskId, i64)> = after
        .tasks_in(&f.todo)
        .map(|t| (t.id.clone(), t.position))
        .collect();
    assert_eq!(todo, vec![(t2, 1)]);
}

#[tokio::test(start_paused = true)]
async fn test_failed_commit_leaves_committed_state_intact() {
    let f = fixture().await;
    let t1 = f.seed_task(&f.todo, "t1", 1).await;
    f.seed_task(&f.doing, "t2", 2).await;
    let store = f.store();
    store.load().await.unwrap();
    let before = store.snapshot().await;
    let mut events = store.events();

    let mut controller = DragController::new();
    activate(&mut controller, &t1, &before);
    controller.hover(DropTarget::List(f.doing.clone()), &before);
    let request = controller.release(&before).unwrap();

    // the backend stays down through the whole retry budget
    f.backend.fail_next_updates(3);
    let result = store
        .move_task(&request.task, &request.list, request.index)
        .await;
    assert!(matches!(result, Err(StoreError::Transport { .. })));

    match events.recv().await.unwrap() {
        StoreEvent::MutationFailed { op, .. } => assert_eq!(op, "move task"),
        other => panic!("unexpected event: {other:?}"),
    }

    // the preview is gone with the gesture and the committed rows never moved
    assert!(controller.preview(&before).is_none());
    let stored = f.backend.tasks_snapshot().await;
    assert_eq!(
        stored.iter().find(|t| t.id == t1).unwrap().list_id,
        f.todo
    );
    assert_eq!(store.snapshot().await.tasks, before.tasks);
}
