//! Activity journal records.

use super::ids::{ActivityId, TaskId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One activity journal entry describing a mutation.
///
/// The journal is append-only and best-effort: a failed append never fails
/// the mutation it describes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: ActivityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    /// Canonical operation string, e.g. "add task".
    pub action: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
}

impl ActivityEntry {
    /// Create an entry for the given operation at the current time.
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            id: ActivityId::new(),
            task_id: None,
            user_id: None,
            action: action.into(),
            metadata: Value::Null,
            created_at: Utc::now(),
        }
    }

    pub fn with_task(mut self, task_id: TaskId) -> Self {
        self.task_id = Some(task_id);
        self
    }

    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_builders() {
        let entry = ActivityEntry::new("add task")
            .with_task(TaskId::from("task-1"))
            .with_user(UserId::from("user-1"))
            .with_metadata(json!({ "list_id": "list-1" }));
        assert_eq!(entry.action, "add task");
        assert_eq!(entry.task_id, Some(TaskId::from("task-1")));
        assert_eq!(entry.metadata["list_id"], "list-1");
    }

    #[test]
    fn test_null_metadata_not_serialized() {
        let entry = ActivityEntry::new("delete task");
        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.as_object().unwrap().get("metadata").is_none());
    }
}
