//! VAT, CIS and self-assessment return records.
//!
//! Figures are entered by the user; the helpers here only keep the derived
//! fields consistent with their inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::ids::generate_id;

string_enum! {
    pub enum FilingStatus {
        Draft => "draft",
        Submitted => "submitted",
        Paid => "paid",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VatReturn {
    pub id: String,
    /// e.g. `2024-Q1` or `2024-01`.
    pub period: String,
    #[serde(with = "crate::timestamp")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub end_date: DateTime<Utc>,
    pub vat_sales: f64,
    pub vat_on_sales: f64,
    pub vat_purchases: f64,
    pub vat_on_purchases: f64,
    pub vat_to_pay: f64,
    pub status: FilingStatus,
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub submitted_date: Option<DateTime<Utc>>,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
}

impl VatReturn {
    pub fn new(
        period: impl Into<String>,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        created_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: generate_id("vat-"),
            period: period.into(),
            start_date,
            end_date,
            vat_sales: 0.0,
            vat_on_sales: 0.0,
            vat_purchases: 0.0,
            vat_on_purchases: 0.0,
            vat_to_pay: 0.0,
            status: FilingStatus::Draft,
            submitted_date: None,
            created_at: now,
            updated_at: now,
            created_by: created_by.into(),
        }
    }

    /// `vat_to_pay = vat_on_sales - vat_on_purchases`
    pub fn recalculate(&mut self) {
        self.vat_to_pay = self.vat_on_sales - self.vat_on_purchases;
    }
}

impl_entity!(VatReturn, EntityKind::VatReturns);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CisSubcontractor {
    pub id: String,
    pub name: String,
    /// Unique Taxpayer Reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utr: Option<String>,
    pub gross_pay: f64,
    pub cis_deduction: f64,
    pub net_pay: f64,
}

impl CisSubcontractor {
    /// Subcontractor paid `gross_pay` with `rate` percent withheld.
    pub fn new(name: impl Into<String>, gross_pay: f64, rate: f64) -> Self {
        let cis_deduction = gross_pay * rate / 100.0;

        Self {
            id: generate_id("sub-"),
            name: name.into(),
            utr: None,
            gross_pay,
            cis_deduction,
            net_pay: gross_pay - cis_deduction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CisReturn {
    pub id: String,
    pub period: String,
    #[serde(with = "crate::timestamp")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub end_date: DateTime<Utc>,
    pub gross_pay: f64,
    pub cis_deduction: f64,
    pub net_pay: f64,
    #[serde(default)]
    pub subcontractors: Vec<CisSubcontractor>,
    pub status: FilingStatus,
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub submitted_date: Option<DateTime<Utc>>,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
}

impl CisReturn {
    pub fn new(
        period: impl Into<String>,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        created_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: generate_id("cis-"),
            period: period.into(),
            start_date,
            end_date,
            gross_pay: 0.0,
            cis_deduction: 0.0,
            net_pay: 0.0,
            subcontractors: Vec::new(),
            status: FilingStatus::Draft,
            submitted_date: None,
            created_at: now,
            updated_at: now,
            created_by: created_by.into(),
        }
    }

    /// Rolls the subcontractor lines up into the return totals.
    pub fn recalculate(&mut self) {
        self.gross_pay = self.subcontractors.iter().map(|s| s.gross_pay).sum();
        self.cis_deduction = self.subcontractors.iter().map(|s| s.cis_deduction).sum();
        self.net_pay = self.subcontractors.iter().map(|s| s.net_pay).sum();
    }
}

impl_entity!(CisReturn, EntityKind::CisReturns);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxReturn {
    pub id: String,
    /// e.g. `2023-2024`.
    pub tax_year: String,
    #[serde(with = "crate::timestamp")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub end_date: DateTime<Utc>,
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    pub tax_owed: f64,
    pub status: FilingStatus,
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub submitted_date: Option<DateTime<Utc>>,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
}

impl TaxReturn {
    pub fn new(
        tax_year: impl Into<String>,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        created_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: generate_id("tax-"),
            tax_year: tax_year.into(),
            start_date,
            end_date,
            total_income: 0.0,
            total_expenses: 0.0,
            net_profit: 0.0,
            tax_owed: 0.0,
            status: FilingStatus::Draft,
            submitted_date: None,
            created_at: now,
            updated_at: now,
            created_by: created_by.into(),
        }
    }

    /// `net_profit = total_income - total_expenses`
    pub fn recalculate(&mut self) {
        self.net_profit = self.total_income - self.total_expenses;
    }
}

impl_entity!(TaxReturn, EntityKind::TaxReturns);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cis_rollup() {
        let now = Utc::now();
        let mut cis = CisReturn::new("2024-Q1", now, now, "emp-1");
        cis.subcontractors.push(CisSubcontractor::new("Sparks Ltd", 1000.0, 20.0));
        cis.subcontractors.push(CisSubcontractor::new("Pipes Ltd", 500.0, 30.0));
        cis.recalculate();

        assert_eq!(cis.gross_pay, 1500.0);
        assert_eq!(cis.cis_deduction, 350.0);
        assert_eq!(cis.net_pay, 1150.0);
    }

    #[test]
    fn test_vat_and_tax_balances() {
        let now = Utc::now();
        let mut vat = VatReturn::new("2024-Q1", now, now, "emp-1");
        vat.vat_on_sales = 900.0;
        vat.vat_on_purchases = 250.0;
        vat.recalculate();
        assert_eq!(vat.vat_to_pay, 650.0);

        let mut tax = TaxReturn::new("2023-2024", now, now, "emp-1");
        tax.total_income = 50_000.0;
        tax.total_expenses = 20_000.0;
        tax.recalculate();
        assert_eq!(tax.net_profit, 30_000.0);
    }
}
