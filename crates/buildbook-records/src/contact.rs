//! Clients, employees, suppliers and other people.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::ids::generate_id;

string_enum! {
    pub enum ContactType {
        Client => "client",
        Employee => "employee",
        Director => "director",
        Supplier => "supplier",
        Subcontractor => "subcontractor",
        Other => "other",
    }
}

string_enum! {
    /// Only meaningful for employees.
    pub enum EmployeeRole {
        Admin => "admin",
        Manager => "manager",
        Supervisor => "supervisor",
        Worker => "worker",
        Accountant => "accountant",
    }
}

string_enum! {
    pub enum ContactStatus {
        Active => "active",
        Inactive => "inactive",
        Lead => "lead",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub relationship: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "type")]
    pub contact_type: ContactType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<EmployeeRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub hire_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    pub status: ContactStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<EmergencyContact>,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        contact_type: ContactType,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: generate_id("contact-"),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: None,
            contact_type,
            role: None,
            position: None,
            employee_id: None,
            company_name: None,
            hire_date: None,
            salary: None,
            hourly_rate: None,
            status: ContactStatus::Active,
            address: None,
            notes: None,
            emergency_contact: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Directors are listed alongside employees on staff screens.
    pub fn is_staff(&self) -> bool {
        matches!(
            self.contact_type,
            ContactType::Employee | ContactType::Director
        )
    }
}

impl_entity!(Contact, EntityKind::Contacts);
