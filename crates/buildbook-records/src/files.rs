//! Uploaded documents and expense receipts.
//!
//! Both carry the uploaded file inline as a base64 data URL in `file_data`.
//! Records written before `created_at`/`updated_at` existed on these kinds
//! decode with the Unix epoch in those fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::ids::generate_id;

string_enum! {
    pub enum DocumentCategory {
        Contract => "contract",
        Permit => "permit",
        Plan => "plan",
        Specification => "specification",
        Photo => "photo",
        Other => "other",
    }
}

string_enum! {
    pub enum ReceiptCategory {
        Materials => "materials",
        Equipment => "equipment",
        Labor => "labor",
        Travel => "travel",
        Utilities => "utilities",
        Other => "other",
    }
}

string_enum! {
    pub enum ReceiptPaymentMethod {
        Cash => "cash",
        Card => "card",
        Cheque => "cheque",
        BankTransfer => "bank-transfer",
        Other => "other",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    pub file_name: String,
    pub file_type: String,
    pub file_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_data: Option<String>,
    pub category: DocumentCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub uploaded_by: String,
    #[serde(with = "crate::timestamp")]
    pub uploaded_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Document {
    pub fn new(
        name: impl Into<String>,
        file_name: impl Into<String>,
        category: DocumentCategory,
        uploaded_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: generate_id("doc-"),
            name: name.into(),
            file_name: file_name.into(),
            file_type: String::new(),
            file_size: 0,
            file_url: None,
            file_data: None,
            category,
            project_id: None,
            uploaded_by: uploaded_by.into(),
            uploaded_at: now,
            description: None,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl_entity!(Document, EntityKind::Documents);

/// Fields read off a receipt image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub id: String,
    pub file_name: String,
    pub file_type: String,
    pub file_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub vendor: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_amount: Option<f64>,
    /// Date of purchase; drives the monthly expense buckets.
    #[serde(with = "crate::timestamp")]
    pub date: DateTime<Utc>,
    pub category: ReceiptCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub payment_method: ReceiptPaymentMethod,
    pub uploaded_by: String,
    #[serde(with = "crate::timestamp")]
    pub uploaded_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_data: Option<OcrData>,
    #[serde(default, with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Receipt {
    pub fn new(
        vendor: impl Into<String>,
        amount: f64,
        date: DateTime<Utc>,
        category: ReceiptCategory,
        uploaded_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: generate_id("rec-"),
            file_name: String::new(),
            file_type: String::new(),
            file_size: 0,
            file_url: None,
            file_data: None,
            project_id: None,
            vendor: vendor.into(),
            amount,
            vat_amount: None,
            date,
            category,
            description: None,
            payment_method: ReceiptPaymentMethod::Card,
            uploaded_by: uploaded_by.into(),
            uploaded_at: now,
            ocr_data: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl_entity!(Receipt, EntityKind::Receipts);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_without_timestamps_decodes_with_epoch() {
        let json = r#"{
            "id": "rec-1",
            "fileName": "till.jpg",
            "fileType": "image/jpeg",
            "fileSize": 2048,
            "vendor": "Builders Merchant",
            "amount": 120.5,
            "date": "2024-05-02T00:00:00.000Z",
            "category": "materials",
            "paymentMethod": "bank-transfer",
            "uploadedBy": "emp-1",
            "uploadedAt": "2024-05-02T10:00:00.000Z"
        }"#;
        let receipt: Receipt = serde_json::from_str(json).unwrap();
        assert_eq!(receipt.payment_method, ReceiptPaymentMethod::BankTransfer);
        assert_eq!(receipt.created_at.timestamp(), 0);
        assert_eq!(receipt.updated_at.timestamp(), 0);
    }

    #[test]
    fn test_document_category_parse() {
        assert_eq!("Permit".parse::<DocumentCategory>(), Ok(DocumentCategory::Permit));
    }
}
