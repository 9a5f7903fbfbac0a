//! Work items, optionally tied to a project.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::ids::generate_id;

string_enum! {
    pub enum TaskStatus {
        Todo => "todo",
        InProgress => "in-progress",
        Review => "review",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

string_enum! {
    pub enum TaskPriority {
        Low => "low",
        Medium => "medium",
        High => "high",
        Urgent => "urgent",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_by: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_hours: Option<f64>,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Document ids.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();

        Self {
            id: generate_id("task-"),
            title: title.into(),
            description: None,
            project_id: None,
            assigned_to: None,
            assigned_by: None,
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            due_date: None,
            completed_date: None,
            estimated_hours: None,
            actual_hours: None,
            created_at: now,
            updated_at: now,
            tags: Vec::new(),
            attachments: Vec::new(),
        }
    }

    pub fn for_project(title: impl Into<String>, project_id: impl Into<String>) -> Self {
        let mut task = Self::new(title);
        task.project_id = Some(project_id.into());
        task
    }

    pub fn complete(&mut self, at: DateTime<Utc>) {
        self.status = TaskStatus::Completed;
        self.completed_date = Some(at);
    }
}

impl_entity!(Task, EntityKind::Tasks);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_sets_date() {
        let mut task = Task::for_project("Pour slab", "proj-1");
        assert_eq!(task.project_id.as_deref(), Some("proj-1"));
        let now = Utc::now();
        task.complete(now);
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.completed_date, Some(now));
    }
}
