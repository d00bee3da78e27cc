//! Export module for BudgetView
//!
//! Ledger export in several formats:
//! - CSV: transactions and budget goals (spreadsheet-compatible)
//! - JSON: full ledger with metadata, re-importable
//! - YAML: full ledger for human-readable backup

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_budget_goals_csv, export_transactions_csv};
pub use json::{export_full_json, import_from_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, import_from_yaml};
