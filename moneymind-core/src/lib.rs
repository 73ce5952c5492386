//! moneymind-core: transaction types, normalization and statistics for MoneyMind

pub mod amount;
pub mod error;
pub mod filter;
pub mod format;
pub mod month;
pub mod service;
pub mod stats;
pub mod time;
pub mod transaction;

pub use amount::RawAmount;
pub use error::StatsError;
pub use filter::{DateRange, TransactionFilter, categories, sort_newest_first, sort_oldest_first};
pub use format::{Currency, FormatError, Locale, MoneyFormat};
pub use month::MonthKey;
pub use service::{InMemoryStore, StatsService, TransactionStore};
pub use stats::{CategorySummary, MonthlyData, TransactionStats, aggregate, aggregate_raw};
pub use time::{parse_date, parse_timezone};
pub use transaction::{RawTransaction, Transaction, TransactionType, normalize_all};
