//! Employee time records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::ids::generate_id;

string_enum! {
    pub enum TimesheetStatus {
        Draft => "draft",
        Submitted => "submitted",
        Approved => "approved",
        Rejected => "rejected",
        Paid => "paid",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timesheet {
    pub id: String,
    pub employee_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(with = "crate::timestamp")]
    pub date: DateTime<Utc>,
    /// `HH:MM` wall-clock time.
    pub start_time: String,
    /// `HH:MM` wall-clock time.
    pub end_time: String,
    /// Minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_duration: Option<f64>,
    pub total_hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pay: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TimesheetStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Timesheet {
    pub fn new(
        employee_id: impl Into<String>,
        date: DateTime<Utc>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: generate_id("ts-"),
            employee_id: employee_id.into(),
            project_id: None,
            date,
            start_time: start_time.into(),
            end_time: end_time.into(),
            break_duration: None,
            total_hours: 0.0,
            hourly_rate: None,
            total_pay: None,
            description: None,
            status: TimesheetStatus::Draft,
            approved_by: None,
            approved_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn approve(&mut self, approver: impl Into<String>, at: DateTime<Utc>) {
        self.status = TimesheetStatus::Approved;
        self.approved_by = Some(approver.into());
        self.approved_at = Some(at);
    }
}

impl_entity!(Timesheet, EntityKind::Timesheets);
