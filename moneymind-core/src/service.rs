//! Statistics service: scopes a store's transactions to one user and an
//! optional date range, then aggregates.

use crate::error::Result;
use crate::filter::{DateRange, TransactionFilter, sort_newest_first, sort_oldest_first};
use crate::stats::{TransactionStats, aggregate};
use crate::transaction::Transaction;

/// Source of normalized transactions. Real adapters (database, files) live elsewhere.
pub trait TransactionStore {
    fn transactions_for(&self, user_id: &str) -> Result<Vec<Transaction>>;
}

/// Store over an in-memory list, typically loaded from an export file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryStore {
    transactions: Vec<Transaction>,
}

impl InMemoryStore {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Owners present in the store, first-seen order.
    pub fn user_ids(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for t in &self.transactions {
            if !out.contains(&t.user_id) {
                out.push(t.user_id.clone());
            }
        }
        out
    }
}

impl TransactionStore for InMemoryStore {
    fn transactions_for(&self, user_id: &str) -> Result<Vec<Transaction>> {
        Ok(self
            .transactions
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[derive(Debug, Clone)]
pub struct StatsService<S: TransactionStore> {
    store: S,
}

impl<S: TransactionStore> StatsService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Statistics for `user` over `range`.
    ///
    /// No user yields the empty stats value rather than an error.
    pub fn stats(&self, user: Option<&str>, range: Option<DateRange>) -> Result<TransactionStats> {
        let Some(user_id) = user else {
            tracing::debug!("no user; returning empty stats");
            return Ok(TransactionStats::empty());
        };

        let mut filter = TransactionFilter::new().for_user(user_id);
        filter.range = range;

        let mut scoped = filter.apply(&self.store.transactions_for(user_id)?);
        sort_oldest_first(&mut scoped);

        tracing::debug!(user = user_id, transactions = scoped.len(), "computing stats");
        Ok(aggregate(&scoped))
    }

    /// Transactions matching `filter`, newest first. A filter without a user matches nothing.
    pub fn transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let Some(user_id) = filter.user_id.as_deref() else {
            return Ok(Vec::new());
        };
        let mut out = filter.apply(&self.store.transactions_for(user_id)?);
        sort_newest_first(&mut out);
        Ok(out)
    }
}
