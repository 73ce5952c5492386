pub mod csv_export;
pub mod json_export;

pub use csv_export::{parse_transactions_csv, parse_transactions_csv_reader};
pub use json_export::{parse_transactions_json, parse_transactions_json_file};
