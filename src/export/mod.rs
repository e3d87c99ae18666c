//! Export module for fintrack
//!
//! The caller's own ledger in three formats:
//! - JSON: machine-readable, versioned document
//! - YAML: the same document, human-readable
//! - CSV: expenses and incomes as one flat list

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_movements_csv;
pub use self::json::{export_json, LedgerExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::export_yaml;
