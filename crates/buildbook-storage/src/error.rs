//! Storage error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage quota exceeded writing {key}: {needed} bytes needed, quota is {quota} bytes. Please clear some data.")]
    QuotaExceeded { key: String, needed: u64, quota: u64 },

    #[error("Stored data under {key} is unreadable: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}
