//! Error type shared by normalization, filtering and aggregation.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    #[error("transaction {id}: amount {value:?} is not a number")]
    MalformedAmount { id: String, value: String },

    #[error("transaction {id}: amount is not finite")]
    NonFiniteAmount { id: String },

    #[error("transaction {id}: invalid date {value:?}")]
    InvalidDate { id: String, value: String },

    #[error("unknown transaction type {value:?} (expected INCOME or EXPENSE)")]
    UnknownType { value: String },

    #[error("invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("transaction store: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, StatsError>;
