//! Export module for flip-ledger
//!
//! - JSON: full export of every record plus portfolio metrics
//! - YAML: the same export in a human-readable form
//! - CSV: expenses, for spreadsheets

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_expenses_csv;
pub use json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
