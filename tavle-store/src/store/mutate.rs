//! Mutation operations.
//!
//! Every mutation writes through to the backend and leaves the visible
//! state alone; the change event it provokes drives the reload that makes
//! the result visible. Validation that can fail locally (auth, unknown
//! list) happens before any backend call.

use super::{BoardStore, StoreEvent};
use crate::config::MoveSemantics;
use crate::defaults;
use crate::error::{Result, StoreError};
use crate::retry::with_retry;
use crate::types::{ActivityEntry, ListId, NewTask, Task, TaskId, TaskPatch};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::future::Future;
use tracing::{debug, error, info, warn};

impl BoardStore {
    /// Create a task at the end of the board in the given list.
    ///
    /// Requires a signed-in user; an anonymous session fails with
    /// [`StoreError::AuthRequired`] before any backend call. The new task
    /// gets the default priority, a status derived from the list title,
    /// the session user as assignee, and a position one past the current
    /// board-wide task count.
    pub async fn add_task(&self, list: &ListId, title: Option<&str>) -> Result<Task> {
        let shared = &self.shared;
        let Some(user) = shared.session.user_id() else {
            warn!("add task rejected: no signed-in user");
            return Err(StoreError::AuthRequired);
        };

        let (position, status) = {
            let state = shared.state.read().await;
            let Some(target) = state.list(list) else {
                return Err(StoreError::list_not_found(list.as_str()));
            };
            // position counts the whole board, not the target list
            (
                state.tasks.len() as i64 + 1,
                defaults::status_for_list(&target.title),
            )
        };

        let new_task = NewTask::new(
            list.clone(),
            title.unwrap_or(defaults::DEFAULT_TASK_TITLE),
            position,
        )
        .with_status(status)
        .with_assignee(user.clone());

        let created = self
            .mutate("add task", || shared.backend.insert_task(new_task.clone()))
            .await?;
        info!("task {} added to list {}", created.id, list);

        self.record_activity(self.journal(
            "add task",
            &created.id,
            json!({ "list_id": list.as_str(), "title": created.title }),
        ))
        .await;

        Ok(created)
    }

    /// Write exactly the fields set in `patch` to the backend. An empty
    /// patch is a no-op. The visible state is not touched; the reload
    /// provoked by the change event brings the result back.
    pub async fn update_task(&self, id: &TaskId, patch: TaskPatch) -> Result<()> {
        if patch.is_empty() {
            debug!("empty patch for task {}, nothing to write", id);
            return Ok(());
        }
        let shared = &self.shared;
        let fields = serde_json::to_value(&patch).unwrap_or(Value::Null);

        self.mutate("update task", || {
            shared.backend.update_task(id, patch.clone())
        })
        .await?;
        info!("task {} updated", id);

        self.record_activity(self.journal("update task", id, json!({ "fields": fields })))
            .await;
        Ok(())
    }

    /// Delete a task. A missing target surfaces the backend's
    /// [`StoreError::TaskNotFound`].
    pub async fn delete_task(&self, id: &TaskId) -> Result<()> {
        let shared = &self.shared;
        self.mutate("delete task", || shared.backend.delete_task(id))
            .await?;
        info!("task {} deleted", id);

        self.record_activity(self.journal("delete task", id, Value::Null))
            .await;
        Ok(())
    }

    /// Move a task to `to_list` at `index` (0-based within the list).
    ///
    /// The destination list must exist in the visible state. What gets
    /// written depends on the configured
    /// [`MoveSemantics`](crate::MoveSemantics): a single minimal write of
    /// the moved task, or that plus a renumbering of the displaced tasks
    /// in the source and destination lists.
    pub async fn move_task(&self, id: &TaskId, to_list: &ListId, index: i64) -> Result<()> {
        let shared = &self.shared;
        let plan = {
            let state = shared.state.read().await;
            if state.list(to_list).is_none() {
                return Err(StoreError::list_not_found(to_list.as_str()));
            }
            match shared.config.move_semantics {
                MoveSemantics::MinimalWrite => vec![(
                    id.clone(),
                    TaskPatch::new()
                        .with_list_id(to_list.clone())
                        .with_position(index)
                        .with_updated_at(Utc::now()),
                )],
                MoveSemantics::Renumber => {
                    renumber_plan(&state.tasks, id, to_list, index, Utc::now())
                }
            }
        };

        for (task, patch) in plan {
            self.mutate("move task", || shared.backend.update_task(&task, patch.clone()))
                .await?;
        }
        info!("task {} moved to list {} at index {}", id, to_list, index);

        self.record_activity(self.journal(
            "move task",
            id,
            json!({ "list_id": to_list.as_str(), "index": index }),
        ))
        .await;
        Ok(())
    }

    /// Run one backend call under the deadline and retry budget. A final
    /// failure lands in `last_error` and on the event feed before being
    /// returned.
    async fn mutate<T, F, Fut>(&self, op: &'static str, mut call: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let shared = &self.shared;
        let result = with_retry(&shared.config.retry, op, || shared.bounded(call())).await;
        match result {
            Ok(value) => Ok(value),
            Err(e) => {
                error!("{} failed: {}", op, e);
                shared.state.write().await.last_error = Some(e.to_string());
                let _ = shared.events.send(StoreEvent::MutationFailed {
                    op: op.to_string(),
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    fn journal(&self, action: &str, task: &TaskId, metadata: Value) -> ActivityEntry {
        let mut entry = ActivityEntry::new(action)
            .with_task(task.clone())
            .with_metadata(metadata);
        if let Some(user) = self.shared.session.user_id() {
            entry = entry.with_user(user.clone());
        }
        entry
    }

    /// Append to the activity journal. Best-effort: a failed append is
    /// logged and never fails the mutation it describes.
    async fn record_activity(&self, entry: ActivityEntry) {
        let shared = &self.shared;
        if let Err(e) = shared.bounded(shared.backend.insert_activity(entry)).await {
            warn!("activity append failed: {}", e);
        }
    }
}

/// Position rewrites for a renumbering move. The moved task lands at
/// `index` (0-based, clamped to the list) in `to_list`, then the source
/// and destination lists are renumbered as contiguous 1-based sequences.
///
/// The moved task's patch comes first so a not-found passthrough from the
/// backend fires before any displaced-task write. Displaced tasks whose
/// stored position already matches are skipped.
fn renumber_plan(
    tasks: &[Task],
    moved: &TaskId,
    to_list: &ListId,
    index: i64,
    now: DateTime<Utc>,
) -> Vec<(TaskId, TaskPatch)> {
    let Some(moved_task) = tasks.iter().find(|t| &t.id == moved) else {
        // unknown locally: single write, the backend decides existence
        return vec![(
            moved.clone(),
            TaskPatch::new()
                .with_list_id(to_list.clone())
                .with_position(index)
                .with_updated_at(now),
        )];
    };
    let from_list = moved_task.list_id.clone();

    let destination: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.list_id == *to_list && &t.id != moved)
        .collect();
    let slot = (index.max(0) as usize).min(destination.len());

    let mut plan = vec![(
        moved.clone(),
        TaskPatch::new()
            .with_list_id(to_list.clone())
            .with_position(slot as i64 + 1)
            .with_updated_at(now),
    )];

    for (offset, task) in destination.iter().enumerate() {
        let position = if offset < slot {
            offset as i64 + 1
        } else {
            offset as i64 + 2
        };
        if task.position != position {
            plan.push((task.id.clone(), TaskPatch::new().with_position(position)));
        }
    }

    if from_list != *to_list {
        for (offset, task) in tasks
            .iter()
            .filter(|t| t.list_id == from_list && &t.id != moved)
            .enumerate()
        {
            let position = offset as i64 + 1;
            if task.position != position {
                plan.push((task.id.clone(), TaskPatch::new().with_position(position)));
            }
        }
    }

    plan
}
