use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Priority given to tasks created without one
pub const DEFAULT_PRIORITY: &str = "low";

/// Lifecycle status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Active,
    Done,
    Deleted,
}

impl TaskStatus {
    /// Marker shown in front of the task name
    pub fn marker(self) -> &'static str {
        match self {
            TaskStatus::Active => "[ ]",
            TaskStatus::Done => "[✓]",
            TaskStatus::Deleted => "[DELETED]",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Active => "active",
            TaskStatus::Done => "done",
            TaskStatus::Deleted => "deleted",
        }
    }

    /// Parse a status name as written in the task file
    pub fn parse_status(s: &str) -> Option<TaskStatus> {
        match s {
            "active" => Some(TaskStatus::Active),
            "done" => Some(TaskStatus::Done),
            "deleted" => Some(TaskStatus::Deleted),
            _ => None,
        }
    }
}

/// A single task record.
///
/// `completed_at` is set exactly when the status is `Done`, `deleted_at`
/// exactly when it is `Deleted`. The lifecycle functions in
/// [`crate::ops::task_ops`] keep that pairing intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique id, never reused once assigned
    pub id: u64,
    pub name: String,
    /// Free-form priority label ("low", "high", ...)
    pub priority: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a new active task with the default priority
    pub fn new(id: u64, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Task {
            id,
            name: name.into(),
            priority: DEFAULT_PRIORITY.to_string(),
            status: TaskStatus::Active,
            created_at,
            completed_at: None,
            deleted_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == TaskStatus::Active
    }

    /// Whether the timestamps agree with the status
    pub fn stamps_consistent(&self) -> bool {
        match self.status {
            TaskStatus::Active => self.completed_at.is_none() && self.deleted_at.is_none(),
            TaskStatus::Done => self.completed_at.is_some() && self.deleted_at.is_none(),
            TaskStatus::Deleted => self.deleted_at.is_some() && self.completed_at.is_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_is_active_low_priority() {
        let task = Task::new(1, "buy milk", Utc::now());
        assert_eq!(task.status, TaskStatus::Active);
        assert_eq!(task.priority, "low");
        assert!(task.stamps_consistent());
    }

    #[test]
    fn status_names_round_trip() {
        for status in [TaskStatus::Active, TaskStatus::Done, TaskStatus::Deleted] {
            assert_eq!(TaskStatus::parse_status(status.as_str()), Some(status));
        }
        assert_eq!(TaskStatus::parse_status("todo"), None);
    }

    #[test]
    fn stamps_must_match_status() {
        let mut task = Task::new(1, "a", Utc::now());
        task.status = TaskStatus::Done;
        assert!(!task.stamps_consistent());
        task.completed_at = Some(Utc::now());
        assert!(task.stamps_consistent());
        task.deleted_at = Some(Utc::now());
        assert!(!task.stamps_consistent());
    }

    #[test]
    fn serializes_camel_case_and_omits_empty_stamps() {
        let task = Task::new(3, "a", Utc::now());
        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("completedAt").is_none());
        assert_eq!(json["status"], "active");
    }
}
