//! JSON export: an array of transaction objects as returned by the API.

use anyhow::{Context, Result};
use moneymind_core::RawTransaction;
use std::path::Path;

pub fn parse_transactions_json(text: &str) -> Result<Vec<RawTransaction>> {
    serde_json::from_str(text).context("parsing transaction JSON")
}

pub fn parse_transactions_json_file(path: impl AsRef<Path>) -> Result<Vec<RawTransaction>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_transactions_json(&text).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use moneymind_core::{RawAmount, TransactionType};

    #[test]
    fn test_numbers_and_strings() {
        let json = r#"[
            {"id":"a","userId":"u","amount":12.5,"type":"EXPENSE","category":"Food","date":"2024-02-02"},
            {"id":"b","userId":"u","amount":"3000","type":"INCOME","category":"Salary",
             "description":"Payroll","date":"2024-02-01T00:00:00.000Z","receiptUrl":null}
        ]"#;
        let txns = parse_transactions_json(json).unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].amount, RawAmount::Number(12.5));
        assert_eq!(txns[0].description, None);
        assert_eq!(txns[1].amount, RawAmount::Text("3000".into()));
        assert_eq!(txns[1].kind, TransactionType::Income);
    }

    #[test]
    fn test_rejects_unknown_type() {
        let json = r#"[{"id":"a","userId":"u","amount":1,"type":"REFUND","category":"x","date":"2024-02-02"}]"#;
        assert!(parse_transactions_json(json).is_err());
    }

    #[test]
    fn test_empty_array() {
        assert!(parse_transactions_json("[]").unwrap().is_empty());
    }
}
