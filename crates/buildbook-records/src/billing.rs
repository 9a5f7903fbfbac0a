//! Invoices, quotes and their line items.
//!
//! `subtotal`, `vat_amount` and `total` are snapshots taken when the record
//! is saved; nothing recomputes them afterwards.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::ids::{generate_id, generate_invoice_number, generate_quote_number};

/// Days between issue and due date for a fresh invoice.
pub const DEFAULT_PAYMENT_TERMS_DAYS: i64 = 30;

string_enum! {
    pub enum InvoiceStatus {
        Draft => "draft",
        Sent => "sent",
        Paid => "paid",
        Overdue => "overdue",
        Cancelled => "cancelled",
    }
}

string_enum! {
    pub enum QuoteStatus {
        Draft => "draft",
        Sent => "sent",
        Accepted => "accepted",
        Rejected => "rejected",
        Expired => "expired",
    }
}

string_enum! {
    pub enum PaymentMethod {
        Cash => "cash",
        BankTransfer => "bank-transfer",
        Cheque => "cheque",
        CreditCard => "credit-card",
        Other => "other",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    /// `quantity * unit_price` as of the last edit.
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            id: generate_id("item-"),
            description: description.into(),
            quantity,
            unit_price,
            total: quantity * unit_price,
            category: None,
        }
    }

    pub fn set_quantity(&mut self, quantity: f64) {
        self.quantity = quantity;
        self.total = self.quantity * self.unit_price;
    }

    pub fn set_unit_price(&mut self, unit_price: f64) {
        self.unit_price = unit_price;
        self.total = self.quantity * self.unit_price;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub invoice_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub client_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_address: Option<String>,
    #[serde(with = "crate::timestamp")]
    pub issue_date: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub due_date: DateTime<Utc>,
    pub status: InvoiceStatus,
    #[serde(default)]
    pub items: Vec<LineItem>,
    pub subtotal: f64,
    /// VAT percentage, e.g. `20.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_amount: Option<f64>,
    /// CIS deduction percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cis_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cis_amount: Option<f64>,
    /// Discount percentage, applied before VAT.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub paid_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
}

impl Invoice {
    /// Empty draft issued now and due after the default payment terms.
    pub fn new(client_name: impl Into<String>, created_by: impl Into<String>) -> Self {
        let now = Utc::now();

        Self {
            id: generate_id("inv-"),
            invoice_number: generate_invoice_number(),
            project_id: None,
            client_name: client_name.into(),
            client_email: None,
            client_address: None,
            issue_date: now,
            due_date: now + Duration::days(DEFAULT_PAYMENT_TERMS_DAYS),
            status: InvoiceStatus::Draft,
            items: Vec::new(),
            subtotal: 0.0,
            vat_rate: None,
            vat_amount: None,
            cis_rate: None,
            cis_amount: None,
            discount: None,
            total: 0.0,
            notes: None,
            terms: None,
            paid_date: None,
            payment_method: None,
            created_at: now,
            updated_at: now,
            created_by: created_by.into(),
        }
    }

    /// Overdue either by status or by a `sent` invoice passing its due date.
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        match self.status {
            InvoiceStatus::Overdue => true,
            InvoiceStatus::Sent => self.due_date < now,
            _ => false,
        }
    }

    /// Marks the invoice paid on `paid_date`.
    pub fn mark_paid(&mut self, paid_date: DateTime<Utc>, method: Option<PaymentMethod>) {
        self.status = InvoiceStatus::Paid;
        self.paid_date = Some(paid_date);
        self.payment_method = method;
    }
}

impl_entity!(Invoice, EntityKind::Invoices);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    pub quote_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub client_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_address: Option<String>,
    #[serde(with = "crate::timestamp")]
    pub issue_date: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub valid_until: DateTime<Utc>,
    pub status: QuoteStatus,
    #[serde(default)]
    pub items: Vec<LineItem>,
    pub subtotal: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub accepted_date: Option<DateTime<Utc>>,
    /// Id of the invoice this quote was converted into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converted_to_invoice: Option<String>,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
}

impl Quote {
    pub fn new(client_name: impl Into<String>, created_by: impl Into<String>) -> Self {
        let now = Utc::now();

        Self {
            id: generate_id("quo-"),
            quote_number: generate_quote_number(),
            project_id: None,
            client_name: client_name.into(),
            client_email: None,
            client_address: None,
            issue_date: now,
            valid_until: now + Duration::days(DEFAULT_PAYMENT_TERMS_DAYS),
            status: QuoteStatus::Draft,
            items: Vec::new(),
            subtotal: 0.0,
            vat_rate: None,
            vat_amount: None,
            discount: None,
            total: 0.0,
            notes: None,
            terms: None,
            accepted_date: None,
            converted_to_invoice: None,
            created_at: now,
            updated_at: now,
            created_by: created_by.into(),
        }
    }

    pub fn is_converted(&self) -> bool {
        self.converted_to_invoice.is_some()
    }

    /// Whether the quote should still be offered for conversion.
    pub fn can_convert(&self) -> bool {
        self.status == QuoteStatus::Accepted && !self.is_converted()
    }

    pub fn accept(&mut self, at: DateTime<Utc>) {
        self.status = QuoteStatus::Accepted;
        self.accepted_date = Some(at);
    }
}

impl_entity!(Quote, EntityKind::Quotes);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_total_follows_edits() {
        let mut item = LineItem::new("Bricks", 2.0, 100.0);
        assert_eq!(item.total, 200.0);
        item.set_quantity(3.0);
        assert_eq!(item.total, 300.0);
        item.set_unit_price(10.0);
        assert_eq!(item.total, 30.0);
    }

    #[test]
    fn test_new_invoice_is_due_in_thirty_days() {
        let invoice = Invoice::new("Acme", "emp-1");
        assert_eq!(invoice.status, InvoiceStatus::Draft);
        assert_eq!(invoice.due_date - invoice.issue_date, Duration::days(30));
    }

    #[test]
    fn test_overdue_by_status_or_due_date() {
        let now = Utc::now();
        let mut invoice = Invoice::new("Acme", "emp-1");
        invoice.due_date = now - Duration::days(1);
        assert!(!invoice.is_overdue_at(now));

        invoice.status = InvoiceStatus::Sent;
        assert!(invoice.is_overdue_at(now));

        invoice.due_date = now + Duration::days(1);
        assert!(!invoice.is_overdue_at(now));

        invoice.status = InvoiceStatus::Overdue;
        assert!(invoice.is_overdue_at(now));

        invoice.mark_paid(now, Some(PaymentMethod::BankTransfer));
        assert!(!invoice.is_overdue_at(now));
    }

    #[test]
    fn test_quote_conversion_eligibility() {
        let mut quote = Quote::new("Acme", "emp-1");
        assert!(!quote.can_convert());
        quote.accept(Utc::now());
        assert!(quote.can_convert());
        quote.converted_to_invoice = Some("inv-1".to_string());
        assert!(!quote.can_convert());
    }

    #[test]
    fn test_invoice_wire_format() {
        let mut invoice = Invoice::new("Acme", "emp-1");
        invoice.payment_method = Some(PaymentMethod::BankTransfer);
        let value = serde_json::to_value(&invoice).unwrap();
        assert_eq!(value["paymentMethod"], "bank-transfer");
        assert!(value.get("invoiceNumber").is_some());
        assert!(value.get("paidDate").is_none());
    }
}
