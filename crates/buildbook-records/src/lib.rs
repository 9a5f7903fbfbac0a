//! Buildbook Records
//!
//! Entity types for every record kind the back office keeps: projects,
//! billing, people, files, time, banking, tax filings and the calendar.
//! Records are plain serde structs; foreign keys are soft string
//! references with no existence or cascade guarantees.

#[macro_use]
mod macros;

mod banking;
mod billing;
mod calendar;
mod contact;
mod entity;
mod files;
mod ids;
mod project;
mod settings;
mod task;
mod tax;
mod timesheet;
pub mod timestamp;

pub use banking::{BankStatement, BankTransaction, TransactionCategory, TransactionType};
pub use billing::{
    Invoice, InvoiceStatus, LineItem, PaymentMethod, Quote, QuoteStatus, DEFAULT_PAYMENT_TERMS_DAYS,
};
pub use calendar::{CalendarEvent, EventType};
pub use contact::{Contact, ContactStatus, ContactType, EmergencyContact, EmployeeRole};
pub use entity::{Entity, EntityKind};
pub use files::{
    Document, DocumentCategory, OcrData, Receipt, ReceiptCategory, ReceiptPaymentMethod,
};
pub use ids::{generate_id, generate_invoice_number, generate_quote_number};
pub use project::{Project, ProjectStatus};
pub use settings::AppSettings;
pub use task::{Task, TaskPriority, TaskStatus};
pub use tax::{CisReturn, CisSubcontractor, FilingStatus, TaxReturn, VatReturn};
pub use timesheet::{Timesheet, TimesheetStatus};
