//! Plain-text rendering of statistics and transaction lists.

use moneymind_core::{MoneyFormat, Transaction, TransactionStats};
use std::fmt::Write;

pub fn render_stats(stats: &TransactionStats, fmt: &MoneyFormat) -> String {
    let mut out = String::new();

    if stats.is_empty() {
        out.push_str("No transactions in this period.\n");
        return out;
    }

    out.push_str("## Summary\n\n");
    let _ = writeln!(out, "Total income:   {}", fmt.format(stats.total_income));
    let _ = writeln!(out, "Total expenses: {}", fmt.format(stats.total_expense));
    let _ = writeln!(out, "Balance:        {}", fmt.format(stats.balance));

    out.push_str("\n## Expenses by category\n\n");
    if stats.by_category.is_empty() {
        out.push_str("(no expenses)\n");
    }
    for c in &stats.by_category {
        let _ = writeln!(
            out,
            "- {} | {} | {:.0}% | count={}",
            c.category,
            fmt.format(c.total),
            c.share_of(stats.total_expense),
            c.count
        );
    }

    out.push_str("\n## By month\n\n");
    for m in &stats.by_month {
        let _ = writeln!(
            out,
            "- {} | income {} | expenses {}",
            fmt.month_label(m.key),
            fmt.format(m.income),
            fmt.format(m.expense)
        );
    }

    out
}

pub fn render_transactions(txns: &[Transaction], fmt: &MoneyFormat) -> String {
    let mut out = String::new();
    if txns.is_empty() {
        out.push_str("No transactions found.\n");
        return out;
    }
    for t in txns {
        let _ = writeln!(
            out,
            "{} [{}] {} | {} | {}{}",
            t.date.format("%Y-%m-%d"),
            t.kind,
            fmt.format(t.signed_amount()),
            t.category,
            t.description.as_deref().unwrap_or("-"),
            if t.receipt_url.is_some() { " (receipt)" } else { "" }
        );
    }
    let _ = writeln!(out, "\n{} transaction(s)", txns.len());
    out
}
