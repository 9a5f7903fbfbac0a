//! Invoice and quote totals.
//!
//! Amounts are plain `f64` with no intermediate rounding. The discount is
//! taken off the subtotal before VAT is applied.

use buildbook_records::{Invoice, LineItem, Quote};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub discount_amount: f64,
    pub vat_amount: f64,
    pub total: f64,
}

impl InvoiceTotals {
    pub fn after_discount(&self) -> f64 {
        self.subtotal - self.discount_amount
    }
}

/// Totals for `items` with an optional VAT rate and discount, both given
/// as percentages. A missing or zero rate contributes nothing.
pub fn compute_invoice_totals(
    items: &[LineItem],
    vat_rate: Option<f64>,
    discount_pct: Option<f64>,
) -> InvoiceTotals {
    let subtotal: f64 = items.iter().map(|i| i.quantity * i.unit_price).sum();

    let discount_amount = match discount_pct {
        Some(pct) if pct != 0.0 => subtotal * pct / 100.0,
        _ => 0.0,
    };
    let after_discount = subtotal - discount_amount;

    let vat_amount = match vat_rate {
        Some(rate) if rate != 0.0 => after_discount * rate / 100.0,
        _ => 0.0,
    };

    InvoiceTotals {
        subtotal,
        discount_amount,
        vat_amount,
        total: after_discount + vat_amount,
    }
}

/// Refreshes line totals and the stored amounts of a billing record from
/// its items.
pub trait ApplyTotals {
    fn recalculate(&mut self) -> InvoiceTotals;
}

fn refresh_lines(items: &mut [LineItem]) {
    for item in items {
        item.total = item.quantity * item.unit_price;
    }
}

impl ApplyTotals for Invoice {
    fn recalculate(&mut self) -> InvoiceTotals {
        refresh_lines(&mut self.items);
        let totals = compute_invoice_totals(&self.items, self.vat_rate, self.discount);

        self.subtotal = totals.subtotal;
        self.vat_amount = Some(totals.vat_amount);
        self.total = totals.total;

        totals
    }
}

impl ApplyTotals for Quote {
    fn recalculate(&mut self) -> InvoiceTotals {
        refresh_lines(&mut self.items);
        let totals = compute_invoice_totals(&self.items, self.vat_rate, self.discount);

        self.subtotal = totals.subtotal;
        self.vat_amount = Some(totals.vat_amount);
        self.total = totals.total;

        totals
    }
}
