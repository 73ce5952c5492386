//! moneymind-ingest: reads CSV/JSON exports of the transaction table into raw records.

pub mod loader;
pub mod parsers;
pub mod types;

pub use loader::{load_store, load_transactions};
pub use types::ExportFormat;
