//! Load an export file and turn it into a transaction store.

use anyhow::{Context, Result, bail};
use chrono_tz::Tz;
use moneymind_core::{InMemoryStore, RawTransaction, normalize_all};
use std::path::Path;

use crate::parsers::{parse_transactions_csv, parse_transactions_json_file};
use crate::types::ExportFormat;

/// Read raw records, choosing the parser by file extension.
pub fn load_transactions(path: impl AsRef<Path>) -> Result<Vec<RawTransaction>> {
    let path = path.as_ref();
    if !path.exists() {
        bail!("transaction file not found: {}", path.display());
    }

    let txns = match ExportFormat::from_path(path) {
        Some(ExportFormat::Csv) => parse_transactions_csv(path)?,
        Some(ExportFormat::Json) => parse_transactions_json_file(path)?,
        None => bail!(
            "unsupported file type: {} (expected .csv or .json)",
            path.display()
        ),
    };

    tracing::info!(count = txns.len(), path = %path.display(), "loaded transactions");
    Ok(txns)
}

/// Load and normalize into a store. A single malformed record fails the load.
pub fn load_store(path: impl AsRef<Path>, tz: Tz) -> Result<InMemoryStore> {
    let path = path.as_ref();
    let raw = load_transactions(path)?;
    let txns = normalize_all(&raw, tz).with_context(|| format!("normalizing {}", path.display()))?;
    Ok(InMemoryStore::new(txns))
}
