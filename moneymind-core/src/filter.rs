//! Caller-side scoping of transaction sets: owner, date range, type,
//! category and free-text search.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Result, StatsError};
use crate::transaction::{Transaction, TransactionType};

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(StatsError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Only a fully specified range filters anything; one open end means no range.
    pub fn from_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Option<Self>> {
        match (start, end) {
            (Some(s), Some(e)) => Self::new(s, e).map(Some),
            _ => Ok(None),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub user_id: Option<String>,
    pub kind: Option<TransactionType>,
    pub category: Option<String>,
    pub range: Option<DateRange>,
    pub search: Option<String>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = (!term.trim().is_empty()).then_some(term);
        self
    }

    /// True when any of the list-view filters (type, category, search) is set.
    pub fn is_active(&self) -> bool {
        self.kind.is_some() || self.category.is_some() || self.search.is_some()
    }

    pub fn matches(&self, t: &Transaction) -> bool {
        if let Some(user) = &self.user_id {
            if &t.user_id != user {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if t.kind != kind {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &t.category != category {
                return false;
            }
        }
        if let Some(range) = &self.range {
            if !range.contains(t.date) {
                return false;
            }
        }
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            let in_description = t
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&term));
            if !in_description && !t.category.to_lowercase().contains(&term) {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect()
    }
}

/// Distinct categories in first-seen order.
pub fn categories(transactions: &[Transaction]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for t in transactions {
        if seen.insert(t.category.as_str()) {
            out.push(t.category.clone());
        }
    }
    out
}

pub fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}

pub fn sort_oldest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| a.date.cmp(&b.date));
}
