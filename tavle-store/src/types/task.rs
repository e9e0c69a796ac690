//! Task records and their mutation payloads.

use super::ids::{ListId, TaskId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task priority, on the fixed three-level scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// A task (card) on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Owning list. Mutable: moving a task to another column rewrites this.
    pub list_id: ListId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Order within the owning list. Uniqueness is the intent, but it is not
    /// enforced under minimal-write moves, so readers must tolerate
    /// collisions and gaps.
    pub position: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<UserId>,
    pub priority: Priority,
    /// Free-form workflow state, loosely correlated with the owning list's
    /// title but never reconciled against it.
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a task with a generated id, defaults, and the current time.
    /// Mostly useful for seeding backends and fixtures; production inserts
    /// go through [`NewTask`] so the backend assigns id and timestamps.
    pub fn new(list_id: ListId, title: impl Into<String>, position: i64) -> Self {
        let now = Utc::now();
        Self {
            id: TaskId::new(),
            list_id,
            title: title.into(),
            description: None,
            position,
            start_date: None,
            end_date: None,
            assignee_id: None,
            priority: Priority::default(),
            status: crate::defaults::DEFAULT_TASK_STATUS.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee_id = Some(assignee);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Insert payload for a task. The backend assigns the id and timestamps and
/// returns the created record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub list_id: ListId,
    pub title: String,
    pub position: i64,
    pub priority: Priority,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<UserId>,
}

impl NewTask {
    pub fn new(list_id: ListId, title: impl Into<String>, position: i64) -> Self {
        Self {
            list_id,
            title: title.into(),
            position,
            priority: Priority::default(),
            status: crate::defaults::DEFAULT_TASK_STATUS.to_string(),
            assignee_id: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee_id = Some(assignee);
        self
    }
}

/// Partial update for a task. `None` fields are left untouched.
///
/// Clearable fields nest their options: `None` leaves the field alone,
/// `Some(None)` clears it, `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<ListId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<Option<UserId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TaskPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list_id(mut self, list_id: ListId) -> Self {
        self.list_id = Some(list_id);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set or clear the description.
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn with_position(mut self, position: i64) -> Self {
        self.position = Some(position);
        self
    }

    /// Set or clear the start date.
    pub fn with_start_date(mut self, start_date: Option<DateTime<Utc>>) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Set or clear the end date.
    pub fn with_end_date(mut self, end_date: Option<DateTime<Utc>>) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Set or clear the assignee.
    pub fn with_assignee(mut self, assignee: Option<UserId>) -> Self {
        self.assignee_id = Some(assignee);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.list_id.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.position.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.assignee_id.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.updated_at.is_none()
    }

    /// Apply the set fields to a task record. Callers own the decision of
    /// bumping `updated_at` when the patch does not carry one.
    pub fn apply(&self, task: &mut Task) {
        if let Some(list_id) = &self.list_id {
            task.list_id = list_id.clone();
        }
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(position) = self.position {
            task.position = position;
        }
        if let Some(start_date) = &self.start_date {
            task.start_date = *start_date;
        }
        if let Some(end_date) = &self.end_date {
            task.end_date = *end_date;
        }
        if let Some(assignee_id) = &self.assignee_id {
            task.assignee_id = assignee_id.clone();
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(status) = &self.status {
            task.status = status.clone();
        }
        if let Some(updated_at) = self.updated_at {
            task.updated_at = updated_at;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new(ListId::from("list-1"), "Write report", 3);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.status, "todo");
        assert_eq!(task.position, 3);
        assert!(task.description.is_none());
        assert!(task.assignee_id.is_none());
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_priority_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        assert_eq!(Priority::Low.as_str(), "low");
    }

    #[test]
    fn test_empty_patch() {
        assert!(TaskPatch::new().is_empty());
        assert!(!TaskPatch::new().with_title("x").is_empty());
    }

    #[test]
    fn test_patch_apply_sets_and_clears() {
        let mut task = Task::new(ListId::from("list-1"), "Draft", 1)
            .with_description("rough notes")
            .with_priority(Priority::Low);

        let patch = TaskPatch::new()
            .with_title("Final")
            .with_description(None)
            .with_priority(Priority::High)
            .with_position(4);
        patch.apply(&mut task);

        assert_eq!(task.title, "Final");
        assert_eq!(task.description, None);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.position, 4);
        // untouched fields survive
        assert_eq!(task.status, "todo");
    }

    #[test]
    fn test_patch_leaves_unset_optionals_alone() {
        let mut task = Task::new(ListId::from("list-1"), "Draft", 1)
            .with_description("keep me")
            .with_assignee(UserId::from("user-1"));

        TaskPatch::new().with_title("Renamed").apply(&mut task);

        assert_eq!(task.description.as_deref(), Some("keep me"));
        assert_eq!(task.assignee_id, Some(UserId::from("user-1")));
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = TaskPatch::new()
            .with_list_id(ListId::from("list-2"))
            .with_position(5);
        let value = serde_json::to_value(&patch).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["list_id"], "list-2");
        assert_eq!(object["position"], 5);
    }
}
