//! Buildbook Core
//!
//! Domain facade for the construction back office. The [`Dashboard`] owns
//! every record collection and the settings, keeps them in memory and
//! writes each change straight through to storage.

mod attachments;
mod collection;
mod config;
mod dashboard;
mod error;

pub use attachments::{format_file_size, load_attachment, mime_for, Attachment};
pub use collection::Collection;
pub use config::{Config, DATA_DIR_ENV};
pub use dashboard::Dashboard;
pub use error::{AttachmentError, CoreError};

// Re-export the layers below
pub use buildbook_finance::{
    compute_invoice_totals, finance_overview_at, invoice_from_quote, timesheet_hours,
    timesheet_pay, ApplyHours, ApplyTotals, FinanceError, FinanceOverview, InvoiceTotals,
    MonthlyAmount,
};
pub use buildbook_records as records;
pub use buildbook_storage::{Database, Keyspace, StorageError, StorageKey, Store};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt().with_env_filter(filter).with_target(true).try_init();
}
