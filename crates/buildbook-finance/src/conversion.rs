//! Quote to invoice synthesis.

use buildbook_records::{generate_id, Invoice, InvoiceStatus, Quote, DEFAULT_PAYMENT_TERMS_DAYS};
use chrono::{DateTime, Duration, Utc};

/// Builds the draft invoice for `quote` as of `now`.
///
/// Client details, items and the quote's stored amounts carry over
/// unchanged. The invoice number is `INV-<unix millis>`. Updating the
/// quote and persisting the invoice is left to the caller.
pub fn invoice_from_quote(quote: &Quote, now: DateTime<Utc>) -> Invoice {
    Invoice {
        id: generate_id("inv-"),
        invoice_number: format!("INV-{}", now.timestamp_millis()),
        project_id: quote.project_id.clone(),
        client_name: quote.client_name.clone(),
        client_email: quote.client_email.clone(),
        client_address: quote.client_address.clone(),
        issue_date: now,
        due_date: now + Duration::days(DEFAULT_PAYMENT_TERMS_DAYS),
        status: InvoiceStatus::Draft,
        items: quote.items.clone(),
        subtotal: quote.subtotal,
        vat_rate: quote.vat_rate,
        vat_amount: quote.vat_amount,
        cis_rate: None,
        cis_amount: None,
        discount: quote.discount,
        total: quote.total,
        notes: quote.notes.clone(),
        terms: quote.terms.clone(),
        paid_date: None,
        payment_method: None,
        created_at: now,
        updated_at: now,
        created_by: quote.created_by.clone(),
    }
}
