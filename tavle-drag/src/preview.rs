//! Preview projection: the transient display layer of an active drag.
//!
//! The projection is a pure function of the committed snapshot and the
//! gesture's working order. It never touches the store; dropping it is the
//! whole rollback story.

use std::collections::HashSet;
use tavle_store::types::{ListId, Task, TaskId};
use tavle_store::BoardSnapshot;

/// Standard array move: remove the element at `from` and reinsert it at
/// `to` (clamped); everything between shifts by one.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() {
        return;
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
}

/// The ordering a gesture works against: the flat board-wide task order
/// captured at activation, plus the dragged task's display membership.
///
/// Non-dragged tasks keep the membership the snapshot gives them; only the
/// dragged task's list can differ from the committed state.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingOrder {
    order: Vec<TaskId>,
    dragged: TaskId,
    dragged_list: ListId,
}

impl WorkingOrder {
    /// Capture the current order for a drag of `dragged`. Returns `None`
    /// when the task is not in the snapshot.
    pub fn capture(snapshot: &BoardSnapshot, dragged: &TaskId) -> Option<Self> {
        let task = snapshot.task(dragged)?;
        Some(Self {
            order: snapshot.tasks.iter().map(|t| t.id.clone()).collect(),
            dragged: dragged.clone(),
            dragged_list: task.list_id.clone(),
        })
    }

    pub fn dragged(&self) -> &TaskId {
        &self.dragged
    }

    /// The dragged task's display list.
    pub fn dragged_list(&self) -> &ListId {
        &self.dragged_list
    }

    /// Hovering over another task: the dragged task array-moves to that
    /// task's slot in the flat order (landing before it when dragged from
    /// below, after it when dragged from above) and, across lists, adopts
    /// its list.
    pub fn hover_task(&mut self, over: &TaskId, snapshot: &BoardSnapshot) {
        if over == &self.dragged {
            return;
        }
        let Some(over_task) = snapshot.task(over) else {
            return;
        };
        let (Some(from), Some(to)) = (self.index_of(&self.dragged), self.index_of(over)) else {
            return;
        };
        if over_task.list_id != self.dragged_list {
            self.dragged_list = over_task.list_id.clone();
        }
        array_move(&mut self.order, from, to);
    }

    /// Hovering over a list container: the dragged task adopts the list and
    /// lands after its last member. An empty list changes membership only.
    pub fn hover_list(&mut self, list: &ListId, snapshot: &BoardSnapshot) {
        self.dragged_list = list.clone();
        let Some(from) = self.index_of(&self.dragged) else {
            return;
        };
        let mut last = None;
        for (i, id) in self.order.iter().enumerate() {
            if id == &self.dragged {
                continue;
            }
            if snapshot.task(id).is_some_and(|t| &t.list_id == list) {
                last = Some(i);
            }
        }
        if let Some(last) = last {
            let to = if from < last { last } else { last + 1 };
            array_move(&mut self.order, from, to);
        }
    }

    /// 0-based index of the dragged task within its display list: the
    /// number of that list's members appearing before it in the working
    /// order.
    pub fn index_in_list(&self, snapshot: &BoardSnapshot) -> i64 {
        let mut index = 0i64;
        for id in &self.order {
            if id == &self.dragged {
                break;
            }
            if snapshot.task(id).is_some_and(|t| t.list_id == self.dragged_list) {
                index += 1;
            }
        }
        index
    }

    /// Materialize the preview against a committed snapshot.
    ///
    /// Tasks come out in working order with the dragged task's membership
    /// overridden. Tasks that vanished from the snapshot are skipped;
    /// tasks the snapshot grew since activation are appended at the end.
    pub fn project(&self, snapshot: &BoardSnapshot) -> Vec<Task> {
        let mut seen: HashSet<&TaskId> = HashSet::with_capacity(self.order.len());
        let mut tasks = Vec::with_capacity(snapshot.tasks.len());
        for id in &self.order {
            if let Some(task) = snapshot.task(id) {
                let mut task = task.clone();
                if id == &self.dragged {
                    task.list_id = self.dragged_list.clone();
                }
                tasks.push(task);
            }
            seen.insert(id);
        }
        for task in &snapshot.tasks {
            if !seen.contains(&task.id) {
                tasks.push(task.clone());
            }
        }
        tasks
    }

    fn index_of(&self, id: &TaskId) -> Option<usize> {
        self.order.iter().position(|candidate| candidate == id)
    }
}
