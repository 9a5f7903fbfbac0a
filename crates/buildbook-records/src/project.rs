//! Construction projects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::ids::generate_id;

string_enum! {
    /// Project lifecycle. Only `InProgress` counts as active.
    pub enum ProjectStatus {
        Planning => "planning",
        InProgress => "in-progress",
        OnHold => "on-hold",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub client_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(with = "crate::timestamp")]
    pub start_date: DateTime<Utc>,
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<DateTime<Utc>>,
    pub status: ProjectStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_cost: Option<f64>,
    /// Percent complete, 0 to 100.
    #[serde(default)]
    pub progress: f64,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
    /// Contact id of the creating employee.
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assigned_employees: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub receipts: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invoices: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quotes: Vec<String>,
}

impl Project {
    pub fn new(name: impl Into<String>, client_name: impl Into<String>, created_by: impl Into<String>) -> Self {
        let now = Utc::now();

        Self {
            id: generate_id("proj-"),
            name: name.into(),
            description: None,
            client_name: client_name.into(),
            client_email: None,
            client_phone: None,
            address: None,
            start_date: now,
            end_date: None,
            status: ProjectStatus::Planning,
            budget: None,
            actual_cost: None,
            progress: 0.0,
            created_at: now,
            updated_at: now,
            created_by: created_by.into(),
            assigned_employees: Vec::new(),
            tasks: Vec::new(),
            documents: Vec::new(),
            receipts: Vec::new(),
            invoices: Vec::new(),
            quotes: Vec::new(),
        }
    }

    /// Sets progress, clamped to 0..=100.
    pub fn set_progress(&mut self, progress: f64) {
        self.progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 100.0)
        };
    }

    pub fn is_active(&self) -> bool {
        self.status == ProjectStatus::InProgress
    }

    /// Budget left after actual cost, when a budget is set.
    pub fn remaining_budget(&self) -> Option<f64> {
        self.budget
            .map(|budget| budget - self.actual_cost.unwrap_or_default())
    }
}

impl_entity!(Project, EntityKind::Projects);
