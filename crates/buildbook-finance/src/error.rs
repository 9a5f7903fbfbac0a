//! Finance error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FinanceError {
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),
}
