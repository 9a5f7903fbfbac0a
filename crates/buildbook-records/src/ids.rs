//! Client-side identifier and document-number minting.

use chrono::Utc;
use uuid::Uuid;

/// Mints a record id: `<prefix><unix millis>-<9 random chars>`.
pub fn generate_id(prefix: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let random: String = Uuid::new_v4().simple().to_string().chars().take(9).collect();
    format!("{prefix}{millis}-{random}")
}

/// `INV-YYYYMM-NNNN`
pub fn generate_invoice_number() -> String {
    document_number("INV")
}

/// `QUO-YYYYMM-NNNN`
pub fn generate_quote_number() -> String {
    document_number("QUO")
}

fn document_number(prefix: &str) -> String {
    let random = Uuid::new_v4().as_u128() % 10_000;
    format!("{prefix}-{}-{random:04}", Utc::now().format("%Y%m"))
}
