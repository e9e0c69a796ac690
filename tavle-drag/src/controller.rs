//! Drag gesture state machine.

use crate::preview::WorkingOrder;
use serde::{Deserialize, Serialize};
use tavle_store::types::{ListId, Task, TaskId};
use tavle_store::BoardSnapshot;
use tracing::debug;

/// Pointer travel in logical pixels before a press becomes a drag. Presses
/// that stay under it remain clicks.
pub const DRAG_ACTIVATION_DISTANCE: f64 = 5.0;

/// A pointer location in board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &PointerPosition) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// What the pointer is currently over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum DropTarget {
    /// Another task card.
    Task(TaskId),
    /// A list container: its background, header, or empty body.
    List(ListId),
}

/// The single persistence call a completed gesture asks for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub task: TaskId,
    pub list: ListId,
    /// 0-based index within the destination list.
    pub index: i64,
}

#[derive(Debug, Clone, Default)]
enum Phase {
    #[default]
    Idle,
    /// Pressed but under the activation distance. A release here is a
    /// click, not a drop.
    Pending {
        task: TaskId,
        origin: PointerPosition,
    },
    Dragging(Gesture),
}

#[derive(Debug, Clone)]
struct Gesture {
    working: WorkingOrder,
    target: Option<DropTarget>,
}

/// Translates pointer and keyboard gestures into at most one committed
/// move per gesture.
///
/// The controller never mutates the store. It captures a working order at
/// activation, reshapes it on every hover, and on release hands the
/// embedding application a [`MoveRequest`] to submit. Everything between
/// press and release is preview-only; abandoning the gesture discards it.
#[derive(Debug, Default)]
pub struct DragController {
    phase: Phase,
}

impl DragController {
    pub fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    /// A press on a task card. Not yet a drag.
    pub fn pointer_down(&mut self, task: &TaskId, at: PointerPosition) {
        if matches!(self.phase, Phase::Idle) {
            self.phase = Phase::Pending {
                task: task.clone(),
                origin: at,
            };
        }
    }

    /// Pointer movement. Crossing [`DRAG_ACTIVATION_DISTANCE`] from the
    /// press origin activates the drag; returns true on the movement that
    /// did. A press whose task has vanished from the snapshot resets to
    /// idle instead of activating.
    pub fn pointer_move(&mut self, at: PointerPosition, snapshot: &BoardSnapshot) -> bool {
        let Phase::Pending { task, origin } = &self.phase else {
            return false;
        };
        if origin.distance_to(&at) < DRAG_ACTIVATION_DISTANCE {
            return false;
        }
        match WorkingOrder::capture(snapshot, task) {
            Some(working) => {
                debug!("drag activated for task {}", working.dragged());
                self.phase = Phase::Dragging(Gesture {
                    working,
                    target: None,
                });
                true
            }
            None => {
                self.phase = Phase::Idle;
                false
            }
        }
    }

    /// A keyboard grab activates immediately, with no travel distance.
    pub fn keyboard_grab(&mut self, task: &TaskId, snapshot: &BoardSnapshot) -> bool {
        if !matches!(self.phase, Phase::Idle) {
            return false;
        }
        match WorkingOrder::capture(snapshot, task) {
            Some(working) => {
                debug!("keyboard grab of task {}", working.dragged());
                self.phase = Phase::Dragging(Gesture {
                    working,
                    target: None,
                });
                true
            }
            None => false,
        }
    }

    /// Hover over a drop target while dragging. Reshapes the working order
    /// and remembers the target for the eventual release.
    pub fn hover(&mut self, target: DropTarget, snapshot: &BoardSnapshot) {
        let Phase::Dragging(gesture) = &mut self.phase else {
            return;
        };
        match &target {
            DropTarget::Task(id) => gesture.working.hover_task(id, snapshot),
            DropTarget::List(id) => gesture.working.hover_list(id, snapshot),
        }
        gesture.target = Some(target);
    }

    /// The pointer left every droppable. A release in this state reverts.
    pub fn clear_hover(&mut self) {
        if let Phase::Dragging(gesture) = &mut self.phase {
            gesture.target = None;
        }
    }

    /// The transient preview for the current gesture, or `None` when not
    /// dragging. A pure projection; the committed snapshot is never
    /// modified.
    pub fn preview(&self, snapshot: &BoardSnapshot) -> Option<Vec<Task>> {
        match &self.phase {
            Phase::Dragging(gesture) => Some(gesture.working.project(snapshot)),
            _ => None,
        }
    }

    /// Release the gesture.
    ///
    /// With a live drop target and a dragged task still present in the
    /// snapshot this yields exactly one [`MoveRequest`]; in every other
    /// case it yields `None` and the preview simply vanishes. Either way
    /// the controller returns to idle.
    pub fn release(&mut self, snapshot: &BoardSnapshot) -> Option<MoveRequest> {
        let phase = std::mem::take(&mut self.phase);
        let Phase::Dragging(gesture) = phase else {
            return None;
        };
        if gesture.target.is_none() {
            debug!("drop without target, reverting");
            return None;
        }
        let working = gesture.working;
        if snapshot.task(working.dragged()).is_none() {
            debug!("dragged task {} vanished, reverting", working.dragged());
            return None;
        }
        let index = working.index_in_list(snapshot);
        Some(MoveRequest {
            task: working.dragged().clone(),
            list: working.dragged_list().clone(),
            index,
        })
    }

    /// Abort the gesture. The preview vanishes and nothing is committed.
    pub fn cancel(&mut self) {
        if !matches!(self.phase, Phase::Idle) {
            debug!("drag cancelled");
            self.phase = Phase::Idle;
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    /// The task under drag, if a gesture is active.
    pub fn dragged_task(&self) -> Option<&TaskId> {
        match &self.phase {
            Phase::Dragging(gesture) => Some(gesture.working.dragged()),
            _ => None,
        }
    }

    /// The current drop target, if the pointer is over one.
    pub fn drop_target(&self) -> Option<&DropTarget> {
        match &self.phase {
            Phase::Dragging(gesture) => gesture.target.as_ref(),
            _ => None,
        }
    }
}
