//! Buildbook Finance
//!
//! Pure computations over in-memory records: invoice totals, the finance
//! overview, quote to invoice synthesis and timesheet hours. Nothing here
//! touches storage.

mod conversion;
mod error;
mod overview;
mod timesheet;
mod totals;

pub use conversion::invoice_from_quote;
pub use error::FinanceError;
pub use overview::{finance_overview_at, month_labels, FinanceOverview, MonthlyAmount};
pub use timesheet::{timesheet_hours, timesheet_pay, ApplyHours};
pub use totals::{compute_invoice_totals, ApplyTotals, InvoiceTotals};

pub type Result<T> = std::result::Result<T, FinanceError>;
