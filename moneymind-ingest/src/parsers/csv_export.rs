//! CSV export of the transaction table.
//!
//! Expected header (column order is free, extra columns are ignored):
//!   id,userId,amount,type,category,description,date,receiptUrl,receiptDownloadUrl

use anyhow::{Context, Result};
use moneymind_core::{RawAmount, RawTransaction, TransactionType};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow {
    id: String,
    user_id: String,
    amount: String,
    #[serde(rename = "type")]
    kind: String,
    category: String,
    #[serde(default)]
    description: Option<String>,
    date: String,
    #[serde(default)]
    receipt_url: Option<String>,
    #[serde(default)]
    receipt_download_url: Option<String>,
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

impl CsvRow {
    fn into_raw(self) -> Result<RawTransaction> {
        let kind: TransactionType = self
            .kind
            .parse()
            .with_context(|| format!("transaction {}", self.id))?;

        Ok(RawTransaction {
            id: self.id,
            user_id: self.user_id,
            // Amount text is kept verbatim; normalization reports malformed values.
            amount: RawAmount::Text(self.amount),
            kind,
            category: self.category,
            description: non_empty(self.description),
            date: self.date,
            receipt_url: non_empty(self.receipt_url),
            receipt_download_url: non_empty(self.receipt_download_url),
        })
    }
}

/// Parse CSV export rows from any reader. Every row must be well formed.
pub fn parse_transactions_csv_reader<R: Read>(reader: R) -> Result<Vec<RawTransaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut out = Vec::new();
    for (i, result) in rdr.deserialize::<CsvRow>().enumerate() {
        // +2: one for the header, one for 1-based rows
        let line = i + 2;
        let row = result.with_context(|| format!("reading CSV line {line}"))?;
        out.push(row.into_raw().with_context(|| format!("CSV line {line}"))?);
    }
    Ok(out)
}

/// Parse a CSV export file.
pub fn parse_transactions_csv(path: impl AsRef<Path>) -> Result<Vec<RawTransaction>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    parse_transactions_csv_reader(file).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
id,userId,amount,type,category,description,date,receiptUrl,receiptDownloadUrl
tx1,user_1,1000.00,INCOME,Salary,,2024-01-15,,
tx2,user_1,19.99,EXPENSE,Food,Lunch,2024-01-20T12:00:00.000Z,https://cdn.example/r/1.png,https://cdn.example/r/1.png?download=1
";

    #[test]
    fn test_parse_sample() {
        let txns = parse_transactions_csv_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(txns.len(), 2);

        assert_eq!(txns[0].kind, TransactionType::Income);
        assert_eq!(txns[0].amount, RawAmount::Text("1000.00".into()));
        assert_eq!(txns[0].description, None);
        assert_eq!(txns[0].receipt_url, None);

        assert_eq!(txns[1].description.as_deref(), Some("Lunch"));
        assert_eq!(txns[1].date, "2024-01-20T12:00:00.000Z");
        assert!(txns[1].receipt_download_url.is_some());
    }

    #[test]
    fn test_unknown_type_reports_line() {
        let csv = "id,userId,amount,type,category,description,date,receiptUrl,receiptDownloadUrl\n\
                   tx1,user_1,5,TRANSFER,Misc,,2024-01-01,,\n";
        let err = parse_transactions_csv_reader(csv.as_bytes()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("CSV line 2"), "{msg}");
        assert!(msg.contains("TRANSFER"), "{msg}");
    }

    #[test]
    fn test_missing_optional_columns() {
        let csv = "id,userId,amount,type,category,date\ntx1,user_1,5,EXPENSE,Misc,2024-01-01\n";
        let txns = parse_transactions_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].description, None);
    }
}
