//! Finance overview aggregation.

use buildbook_records::{timestamp, Invoice, InvoiceStatus, Project, ProjectStatus, Receipt};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Number of monthly buckets in an overview.
pub const OVERVIEW_MONTHS: u32 = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAmount {
    /// `YYYY-MM`.
    pub month: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceOverview {
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    pub outstanding_invoices: f64,
    pub overdue_invoices: f64,
    pub total_projects: usize,
    pub active_projects: usize,
    /// Oldest month first, the month of the reference instant last.
    pub monthly_revenue: Vec<MonthlyAmount>,
    pub monthly_expenses: Vec<MonthlyAmount>,
}

/// The last twelve calendar months up to and including the month of
/// `now`, oldest first.
pub fn month_labels(now: DateTime<Utc>) -> Vec<String> {
    let current = now.year() * 12 + now.month0() as i32;

    (0..OVERVIEW_MONTHS as i32)
        .rev()
        .map(|back| {
            let index = current - back;
            format!("{:04}-{:02}", index.div_euclid(12), index.rem_euclid(12) + 1)
        })
        .collect()
}

/// Aggregates revenue, expenses and receivables as of `now`.
///
/// Revenue counts paid invoices; monthly revenue buckets them by paid
/// date, so a paid invoice without one only shows up in the total.
pub fn finance_overview_at(
    invoices: &[Invoice],
    receipts: &[Receipt],
    projects: &[Project],
    now: DateTime<Utc>,
) -> FinanceOverview {
    let paid: Vec<&Invoice> = invoices
        .iter()
        .filter(|inv| inv.status == InvoiceStatus::Paid)
        .collect();

    let total_revenue: f64 = paid.iter().map(|inv| inv.total).sum();
    let total_expenses: f64 = receipts.iter().map(|r| r.amount).sum();

    let outstanding_invoices = invoices
        .iter()
        .filter(|inv| inv.status == InvoiceStatus::Sent)
        .map(|inv| inv.total)
        .sum();

    let overdue_invoices = invoices
        .iter()
        .filter(|inv| inv.is_overdue_at(now))
        .map(|inv| inv.total)
        .sum();

    let labels = month_labels(now);

    let monthly_revenue = labels
        .iter()
        .map(|month| MonthlyAmount {
            month: month.clone(),
            amount: paid
                .iter()
                .filter(|inv| {
                    inv.paid_date
                        .map(|d| timestamp::month_label(&d) == *month)
                        .unwrap_or(false)
                })
                .map(|inv| inv.total)
                .sum(),
        })
        .collect();

    let monthly_expenses = labels
        .iter()
        .map(|month| MonthlyAmount {
            month: month.clone(),
            amount: receipts
                .iter()
                .filter(|r| timestamp::month_label(&r.date) == *month)
                .map(|r| r.amount)
                .sum(),
        })
        .collect();

    tracing::debug!(
        invoices = invoices.len(),
        receipts = receipts.len(),
        revenue = total_revenue,
        expenses = total_expenses,
        "Computed finance overview"
    );

    FinanceOverview {
        total_revenue,
        total_expenses,
        net_profit: total_revenue - total_expenses,
        outstanding_invoices,
        overdue_invoices,
        total_projects: projects.len(),
        active_projects: projects
            .iter()
            .filter(|p| p.status == ProjectStatus::InProgress)
            .count(),
        monthly_revenue,
        monthly_expenses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildbook_records::{PaymentMethod, ReceiptCategory};
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn invoice(status: InvoiceStatus, total: f64) -> Invoice {
        let mut invoice = Invoice::new("Acme", "emp-1");
        invoice.status = status;
        invoice.total = total;
        invoice
    }

    fn receipt(amount: f64, date: DateTime<Utc>) -> Receipt {
        Receipt::new("Builders Merchant", amount, date, ReceiptCategory::Materials, "emp-1")
    }

    #[test]
    fn test_month_labels_cross_year() {
        let labels = month_labels(at(2024, 3, 31));
        assert_eq!(labels.len(), 12);
        assert_eq!(labels.first().unwrap(), "2023-04");
        assert_eq!(labels[9], "2024-01");
        assert_eq!(labels.last().unwrap(), "2024-03");
    }

    #[test]
    fn test_month_labels_are_distinct_at_month_end() {
        let mut labels = month_labels(at(2024, 10, 31));
        labels.dedup();
        assert_eq!(labels.len(), 12);
    }

    #[test]
    fn test_current_month_buckets() {
        let now = at(2024, 6, 15);
        let mut paid = invoice(InvoiceStatus::Paid, 1000.0);
        paid.mark_paid(at(2024, 6, 3), Some(PaymentMethod::BankTransfer));

        let overview = finance_overview_at(&[paid], &[receipt(400.0, at(2024, 6, 10))], &[], now);

        assert_eq!(overview.total_revenue, 1000.0);
        assert_eq!(overview.total_expenses, 400.0);
        assert_eq!(overview.net_profit, 600.0);

        let last = overview.monthly_revenue.last().unwrap();
        assert_eq!(last.month, "2024-06");
        assert_eq!(last.amount, 1000.0);
        assert_eq!(overview.monthly_expenses.last().unwrap().amount, 400.0);

        for bucket in &overview.monthly_revenue[..11] {
            assert_eq!(bucket.amount, 0.0);
        }
        for bucket in &overview.monthly_expenses[..11] {
            assert_eq!(bucket.amount, 0.0);
        }
    }

    #[test]
    fn test_receivables() {
        let now = at(2024, 6, 15);
        let mut late = invoice(InvoiceStatus::Sent, 300.0);
        late.due_date = now - Duration::days(1);
        let mut current = invoice(InvoiceStatus::Sent, 200.0);
        current.due_date = now + Duration::days(10);
        let flagged = invoice(InvoiceStatus::Overdue, 50.0);
        let draft = invoice(InvoiceStatus::Draft, 75.0);

        let overview = finance_overview_at(&[late, current, flagged, draft], &[], &[], now);
        assert_eq!(overview.outstanding_invoices, 500.0);
        assert_eq!(overview.overdue_invoices, 350.0);
        assert_eq!(overview.total_revenue, 0.0);
    }

    #[test]
    fn test_paid_without_date_counts_in_total_only() {
        let now = at(2024, 6, 15);
        let overview = finance_overview_at(&[invoice(InvoiceStatus::Paid, 80.0)], &[], &[], now);
        assert_eq!(overview.total_revenue, 80.0);
        assert!(overview.monthly_revenue.iter().all(|b| b.amount == 0.0));
    }

    #[test]
    fn test_old_receipts_outside_window() {
        let now = at(2024, 6, 15);
        let overview = finance_overview_at(&[], &[receipt(10.0, at(2023, 6, 1))], &[], now);
        assert_eq!(overview.total_expenses, 10.0);
        assert!(overview.monthly_expenses.iter().all(|b| b.amount == 0.0));
    }

    #[test]
    fn test_project_counts() {
        let mut active = Project::new("Extension", "Acme", "emp-1");
        active.status = ProjectStatus::InProgress;
        let planned = Project::new("Loft", "Acme", "emp-1");

        let overview = finance_overview_at(&[], &[], &[active, planned], at(2024, 6, 15));
        assert_eq!(overview.total_projects, 2);
        assert_eq!(overview.active_projects, 1);
    }

    #[test]
    fn test_wire_format() {
        let overview = finance_overview_at(&[], &[], &[], at(2024, 6, 15));
        let value = serde_json::to_value(&overview).unwrap();
        assert_eq!(value["monthlyRevenue"][11]["month"], "2024-06");
        assert!(value.get("netProfit").is_some());
    }
}
