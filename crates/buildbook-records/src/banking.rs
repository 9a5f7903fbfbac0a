//! Imported bank statements and their transactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::ids::generate_id;

string_enum! {
    pub enum TransactionType {
        Debit => "debit",
        Credit => "credit",
    }
}

string_enum! {
    pub enum TransactionCategory {
        Income => "income",
        Expense => "expense",
        Transfer => "transfer",
        Other => "other",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankTransaction {
    pub id: String,
    #[serde(with = "crate::timestamp")]
    pub date: DateTime<Utc>,
    pub description: String,
    /// Positive for credits, negative for debits.
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TransactionCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default)]
    pub reconciled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_invoice_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_receipt_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BankTransaction {
    pub fn new(date: DateTime<Utc>, description: impl Into<String>, amount: f64) -> Self {
        let transaction_type = if amount < 0.0 {
            TransactionType::Debit
        } else {
            TransactionType::Credit
        };

        Self {
            id: generate_id("txn-"),
            date,
            description: description.into(),
            amount,
            transaction_type,
            category: None,
            reference: None,
            reconciled: false,
            linked_invoice_id: None,
            linked_receipt_id: None,
            linked_project_id: None,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankStatement {
    pub id: String,
    pub account_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    pub bank_name: String,
    #[serde(with = "crate::timestamp")]
    pub statement_date: DateTime<Utc>,
    #[serde(default)]
    pub transactions: Vec<BankTransaction>,
    pub opening_balance: f64,
    pub closing_balance: f64,
    #[serde(with = "crate::timestamp")]
    pub imported_at: DateTime<Utc>,
    pub imported_by: String,
    #[serde(default, with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl BankStatement {
    pub fn new(
        account_name: impl Into<String>,
        bank_name: impl Into<String>,
        statement_date: DateTime<Utc>,
        imported_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: generate_id("stmt-"),
            account_name: account_name.into(),
            account_number: None,
            bank_name: bank_name.into(),
            statement_date,
            transactions: Vec::new(),
            opening_balance: 0.0,
            closing_balance: 0.0,
            imported_at: now,
            imported_by: imported_by.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sum of all transaction amounts.
    pub fn net_movement(&self) -> f64 {
        self.transactions.iter().map(|t| t.amount).sum()
    }

    /// Whether opening balance plus movement matches the closing balance.
    pub fn balances(&self) -> bool {
        (self.opening_balance + self.net_movement() - self.closing_balance).abs() < 0.005
    }

    pub fn unreconciled(&self) -> impl Iterator<Item = &BankTransaction> {
        self.transactions.iter().filter(|t| !t.reconciled)
    }
}

impl_entity!(BankStatement, EntityKind::BankStatements);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_balances() {
        let now = Utc::now();
        let mut statement = BankStatement::new("Main", "High Street Bank", now, "emp-1");
        statement.opening_balance = 1000.0;
        statement
            .transactions
            .push(BankTransaction::new(now, "Invoice INV-1", 500.0));
        let mut debit = BankTransaction::new(now, "Timber", -200.0);
        debit.reconciled = true;
        statement.transactions.push(debit);
        statement.closing_balance = 1300.0;

        assert_eq!(statement.net_movement(), 300.0);
        assert!(statement.balances());
        assert_eq!(statement.unreconciled().count(), 1);
        assert_eq!(
            statement.transactions[1].transaction_type,
            TransactionType::Debit
        );
    }
}
