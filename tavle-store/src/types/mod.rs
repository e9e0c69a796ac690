//! Core record types shared across the store.

mod activity;
mod ids;
mod list;
mod task;

pub use activity::ActivityEntry;
pub use ids::{ActivityId, BoardId, ListId, TaskId, UserId};
pub use list::List;
pub use task::{NewTask, Priority, Task, TaskPatch};
