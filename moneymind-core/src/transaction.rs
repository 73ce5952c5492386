//! Transaction record types.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::amount::RawAmount;
use crate::error::{Result, StatsError};
use crate::time::parse_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    #[serde(rename = "INCOME")]
    Income,
    #[serde(rename = "EXPENSE")]
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INCOME" => Ok(TransactionType::Income),
            "EXPENSE" => Ok(TransactionType::Expense),
            _ => Err(StatsError::UnknownType {
                value: s.to_string(),
            }),
        }
    }
}

/// A transaction exactly as stored or exported, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    pub id: String,
    pub user_id: String,
    pub amount: RawAmount,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: String,
    #[serde(default)]
    pub receipt_url: Option<String>,
    #[serde(default)]
    pub receipt_download_url: Option<String>,
}

impl RawTransaction {
    /// Normalize amount and date. Calendar dates of timestamps are taken in `tz`.
    pub fn normalize(&self, tz: Tz) -> Result<Transaction> {
        Ok(Transaction {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            amount: self.amount.to_f64(&self.id)?,
            kind: self.kind,
            category: self.category.clone(),
            description: self.description.clone(),
            date: parse_date(&self.date, tz, &self.id)?,
            receipt_url: self.receipt_url.clone(),
            receipt_download_url: self.receipt_download_url.clone(),
        })
    }
}

/// A normalized transaction. `amount` is a positive magnitude; the sign lives in `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub receipt_url: Option<String>,
    pub receipt_download_url: Option<String>,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        kind: TransactionType,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            amount,
            kind,
            category: category.into(),
            description: None,
            date,
            receipt_url: None,
            receipt_download_url: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_receipt(mut self, url: impl Into<String>, download_url: impl Into<String>) -> Self {
        self.receipt_url = Some(url.into());
        self.receipt_download_url = Some(download_url.into());
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Amount with the sign implied by the type (expenses negative).
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// Normalize a whole batch; the first bad record fails the batch.
pub fn normalize_all(raw: &[RawTransaction], tz: Tz) -> Result<Vec<Transaction>> {
    raw.iter().map(|r| r.normalize(tz)).collect()
}
