//! Calendar entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::ids::generate_id;

string_enum! {
    pub enum EventType {
        Meeting => "meeting",
        Deadline => "deadline",
        Milestone => "milestone",
        SiteVisit => "site-visit",
        Other => "other",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "crate::timestamp")]
    pub start_date: DateTime<Utc>,
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub all_day: bool,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attendees: Vec<String>,
    pub created_by: String,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl CalendarEvent {
    pub fn new(
        title: impl Into<String>,
        start_date: DateTime<Utc>,
        event_type: EventType,
        created_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: generate_id("evt-"),
            title: title.into(),
            description: None,
            start_date,
            end_date: None,
            all_day: false,
            event_type,
            project_id: None,
            task_id: None,
            attendees: Vec::new(),
            created_by: created_by.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the event touches `[from, to)`. Events without an end are
    /// treated as instants.
    pub fn overlaps(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
        let end = self.end_date.unwrap_or(self.start_date);
        self.start_date < to && end >= from
    }
}

impl_entity!(CalendarEvent, EntityKind::CalendarEvents);
