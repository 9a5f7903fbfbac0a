//! Buildbook Storage Layer
//!
//! Namespaced key-value persistence on SQLite. Every collection lives under
//! one key as a JSON array; settings live under one key as a JSON object.
//! Reads never fail: unreadable data degrades to an empty collection or
//! default settings. Writes surface quota and database errors.

mod database;
mod error;
mod keys;
mod migrations;
mod store;

pub use database::{Database, DEFAULT_QUOTA_BYTES};
pub use error::StorageError;
pub use keys::{Keyspace, StorageKey, DEFAULT_NAMESPACE};
pub use store::Store;

pub type Result<T> = std::result::Result<T, StorageError>;
