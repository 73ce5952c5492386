//! Transaction statistics: totals, expense breakdown by category and
//! income/expense breakdown by calendar month.
//!
//! The aggregation is a pure function of its input. Callers scope the input
//! to one user (and optionally a date range) before calling in; see
//! [`crate::service::StatsService`].

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::Result;
use crate::month::MonthKey;
use crate::transaction::{RawTransaction, Transaction, TransactionType, normalize_all};

/// Expense total for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub total: f64,
    pub count: usize,
}

impl CategorySummary {
    /// Percentage of `total_expense` this category accounts for (0-100).
    pub fn share_of(&self, total_expense: f64) -> f64 {
        if total_expense <= 0.0 {
            return 0.0;
        }
        self.total / total_expense * 100.0
    }
}

/// Income and expense for one calendar month.
///
/// Serialized as `{month, income, expense}`; on the way back in, the key is
/// rebuilt from the label and an unrecognized label is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MonthlyDataRepr")]
pub struct MonthlyData {
    /// Display label, e.g. "Jan 2024".
    pub month: String,
    pub income: f64,
    pub expense: f64,
    /// Bucket key behind `month`; localized labels are derived from it, never from the label.
    #[serde(skip_serializing)]
    pub key: MonthKey,
}

#[derive(Deserialize)]
struct MonthlyDataRepr {
    month: String,
    income: f64,
    expense: f64,
}

impl TryFrom<MonthlyDataRepr> for MonthlyData {
    type Error = String;

    fn try_from(r: MonthlyDataRepr) -> std::result::Result<Self, Self::Error> {
        let key = MonthKey::from_label(&r.month)
            .ok_or_else(|| format!("unrecognized month label {:?}", r.month))?;
        Ok(Self {
            month: r.month,
            income: r.income,
            expense: r.expense,
            key,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStats {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    /// Expenses only, largest total first.
    pub by_category: Vec<CategorySummary>,
    /// Both types, oldest month first.
    pub by_month: Vec<MonthlyData>,
}

impl TransactionStats {
    /// The value returned for an empty transaction set.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.by_month.is_empty()
    }
}

#[derive(Debug, Default)]
struct MonthTotals {
    income: f64,
    expense: f64,
}

/// Aggregate already-normalized transactions.
pub fn aggregate(transactions: &[Transaction]) -> TransactionStats {
    let mut total_income = 0.0;
    let mut total_expense = 0.0;

    // Categories keep first-seen order so equal totals stay stable after sorting.
    let mut categories: Vec<CategorySummary> = Vec::new();
    let mut category_index: HashMap<&str, usize> = HashMap::new();

    let mut months: BTreeMap<MonthKey, MonthTotals> = BTreeMap::new();

    for t in transactions {
        let bucket = months.entry(MonthKey::from_date(t.date)).or_default();

        match t.kind {
            TransactionType::Income => {
                total_income += t.amount;
                bucket.income += t.amount;
            }
            TransactionType::Expense => {
                total_expense += t.amount;
                bucket.expense += t.amount;

                let idx = *category_index.entry(t.category.as_str()).or_insert_with(|| {
                    categories.push(CategorySummary {
                        category: t.category.clone(),
                        total: 0.0,
                        count: 0,
                    });
                    categories.len() - 1
                });
                categories[idx].total += t.amount;
                categories[idx].count += 1;
            }
        }
    }

    categories.sort_by(|a, b| b.total.total_cmp(&a.total));

    let by_month = months
        .into_iter()
        .map(|(key, totals)| MonthlyData {
            month: key.label(),
            income: totals.income,
            expense: totals.expense,
            key,
        })
        .collect();

    tracing::debug!(
        transactions = transactions.len(),
        categories = categories.len(),
        "aggregated transaction stats"
    );

    TransactionStats {
        total_income,
        total_expense,
        balance: total_income - total_expense,
        by_category: categories,
        by_month,
    }
}

/// Normalize then aggregate. Any malformed record fails the whole call.
pub fn aggregate_raw(raw: &[RawTransaction], tz: Tz) -> Result<TransactionStats> {
    let transactions = normalize_all(raw, tz)?;
    Ok(aggregate(&transactions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::RawAmount;
    use crate::error::StatsError;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn income(id: &str, amount: f64, d: NaiveDate) -> Transaction {
        Transaction::new(id, "user_1", TransactionType::Income, amount, "Salary", d)
    }

    fn expense(id: &str, amount: f64, category: &str, d: NaiveDate) -> Transaction {
        Transaction::new(id, "user_1", TransactionType::Expense, amount, category, d)
    }

    #[test]
    fn test_mixed_month_scenario() {
        let txns = vec![
            income("1", 1000.0, date(2024, 1, 15)),
            expense("2", 200.0, "Food", date(2024, 1, 20)),
            expense("3", 50.0, "Food", date(2024, 2, 1)),
        ];
        let stats = aggregate(&txns);

        assert_eq!(stats.total_income, 1000.0);
        assert_eq!(stats.total_expense, 250.0);
        assert_eq!(stats.balance, 750.0);
        assert_eq!(
            stats.by_category,
            vec![CategorySummary { category: "Food".into(), total: 250.0, count: 2 }]
        );
        let months: Vec<_> = stats
            .by_month
            .iter()
            .map(|m| (m.month.as_str(), m.income, m.expense))
            .collect();
        assert_eq!(months, [("Jan 2024", 1000.0, 200.0), ("Feb 2024", 0.0, 50.0)]);
        assert_eq!(stats.by_month[1].key, MonthKey::new(2024, 2).unwrap());
    }

    #[test]
    fn test_empty_input() {
        let stats = aggregate(&[]);
        assert_eq!(stats, TransactionStats::empty());
        assert_eq!(stats.total_income, 0.0);
        assert_eq!(stats.balance, 0.0);
        assert!(stats.by_category.is_empty());
        assert!(stats.by_month.is_empty());
    }

    #[test]
    fn test_categories_sorted_by_total_desc() {
        let txns = vec![
            expense("1", 100.0, "Food", date(2024, 3, 1)),
            expense("2", 300.0, "Transport", date(2024, 3, 2)),
        ];
        let stats = aggregate(&txns);
        let names: Vec<_> = stats.by_category.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, ["Transport", "Food"]);
    }

    #[test]
    fn test_equal_totals_keep_first_seen_order() {
        let txns = vec![
            expense("1", 40.0, "Books", date(2024, 3, 1)),
            expense("2", 40.0, "Games", date(2024, 3, 2)),
            expense("3", 90.0, "Rent", date(2024, 3, 3)),
        ];
        let stats = aggregate(&txns);
        let names: Vec<_> = stats.by_category.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, ["Rent", "Books", "Games"]);
    }

    #[test]
    fn test_months_chronological_across_years() {
        let txns = vec![
            expense("1", 10.0, "Food", date(2024, 1, 3)),
            expense("2", 10.0, "Food", date(2023, 12, 28)),
        ];
        let stats = aggregate(&txns);
        let months: Vec<_> = stats.by_month.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, ["Dec 2023", "Jan 2024"]);
    }

    #[test]
    fn test_income_never_in_categories() {
        let txns = vec![
            income("1", 500.0, date(2024, 5, 1)),
            expense("2", 20.0, "Salary", date(2024, 5, 2)),
        ];
        let stats = aggregate(&txns);
        assert_eq!(stats.by_category.len(), 1);
        assert_eq!(stats.by_category[0].total, 20.0);
        assert_eq!(stats.by_category[0].count, 1);
    }

    #[test]
    fn test_categories_are_case_and_whitespace_sensitive() {
        let txns = vec![
            expense("1", 1.0, "Food", date(2024, 5, 1)),
            expense("2", 2.0, "food", date(2024, 5, 1)),
            expense("3", 3.0, "Food ", date(2024, 5, 1)),
        ];
        let stats = aggregate(&txns);
        assert_eq!(stats.by_category.len(), 3);
    }

    #[test]
    fn test_aggregate_raw_parses_text_amounts() {
        let raw = vec![RawTransaction {
            id: "r1".into(),
            user_id: "user_1".into(),
            amount: RawAmount::from("19.99"),
            kind: TransactionType::Expense,
            category: "Food".into(),
            description: Some("Lunch".into()),
            date: "2024-06-10".into(),
            receipt_url: None,
            receipt_download_url: None,
        }];
        let stats = aggregate_raw(&raw, Tz::UTC).unwrap();
        assert_eq!(stats.total_expense, 19.99);
        assert_eq!(stats.balance, -19.99);
    }

    #[test]
    fn test_aggregate_raw_rejects_malformed_amount() {
        let raw = vec![RawTransaction {
            id: "r1".into(),
            user_id: "user_1".into(),
            amount: RawAmount::from("abc"),
            kind: TransactionType::Income,
            category: "Salary".into(),
            description: None,
            date: "2024-06-10".into(),
            receipt_url: None,
            receipt_download_url: None,
        }];
        assert!(matches!(
            aggregate_raw(&raw, Tz::UTC),
            Err(StatsError::MalformedAmount { .. })
        ));
    }

    #[test]
    fn test_share_of() {
        let c = CategorySummary { category: "Food".into(), total: 25.0, count: 1 };
        assert_eq!(c.share_of(100.0), 25.0);
        assert_eq!(c.share_of(0.0), 0.0);
    }

    #[test]
    fn test_json_field_names() {
        let stats = aggregate(&[income("1", 10.0, date(2024, 1, 1))]);
        let v = serde_json::to_value(&stats).unwrap();
        assert_eq!(v["totalIncome"], 10.0);
        assert_eq!(v["totalExpense"], 0.0);
        assert_eq!(v["byMonth"][0]["month"], "Jan 2024");
        assert!(v["byCategory"].as_array().unwrap().is_empty());
        assert!(v["byMonth"][0].get("key").is_none());
    }

    #[test]
    fn test_json_round_trip_keeps_month_key() {
        let stats = aggregate(&[
            income("1", 10.0, date(2024, 3, 5)),
            expense("2", 4.0, "Food", date(2023, 12, 9)),
        ]);
        let json = serde_json::to_string(&stats).unwrap();
        let back: TransactionStats = serde_json::from_str(&json).unwrap();

        assert_eq!(back, stats);
        assert_eq!(back.by_month[1].key, MonthKey::new(2024, 3).unwrap());
    }

    #[test]
    fn test_json_rejects_unknown_month_label() {
        let json = r#"{"month":"Mär 2024","income":1.0,"expense":0.0}"#;
        let err = serde_json::from_str::<MonthlyData>(json).unwrap_err();
        assert!(err.to_string().contains("unrecognized month label"), "{err}");
    }
}
